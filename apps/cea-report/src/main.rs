//! cea-report - Monte-Carlo cost-effectiveness report generator
//!
//! Runs an analysis scenario: samples the quantity graph, prints summary
//! statistics to stdout, and renders density/box-plot figures as PNG.
//!
//! Usage:
//!
//! ```text
//! cea-report [scenario.toml]
//! ```
//!
//! Without an argument the built-in scenario is run: the shrimp electrical
//! stunner program compared against corporate cage-free chicken campaigns,
//! in human-equivalent hours of disabling pain averted per dollar, weighted
//! by cross-species moral weights.

mod config;
mod error;
mod evaluate;
mod runner;

use std::path::{Path, PathBuf};

use tracing::info;

use config::ScenarioConfig;
use error::ReportError;

/// Built-in scenario: shrimp stunners vs. corporate cage-free campaigns
const DEFAULT_SCENARIO: &str = include_str!("../scenarios/shrimp_cea.toml");

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = try_main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), ReportError> {
    let (config, base_dir) = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            info!(scenario = %path.display(), "loading scenario");
            let text = std::fs::read_to_string(&path)?;
            let base_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (toml::from_str::<ScenarioConfig>(&text)?, base_dir)
        }
        None => {
            info!("no scenario given, running the built-in shrimp CEA");
            (toml::from_str(DEFAULT_SCENARIO)?, PathBuf::from("."))
        }
    };

    runner::run(&config, &base_dir)
}
