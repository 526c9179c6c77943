//! Top-level error surface for the report generator
//!
//! Every failure is fatal: this is a batch report generator, and a partial
//! report is worse than no report.

use thiserror::Error;

use crate::config::ConfigError;

/// Any error that aborts a report run
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Scenario configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Dist(#[from] cea_dist::DistError),

    #[error(transparent)]
    Load(#[from] cea_io::LoadError),

    #[error(transparent)]
    Plot(#[from] cea_plot::PlotError),
}
