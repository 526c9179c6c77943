//! Scenario configuration
//!
//! A scenario file enumerates everything a run depends on: sample counts,
//! the RNG seed, output settings, the named quantity graph, and the report
//! and plot blocks. Parameter-sweep variants of the analysis are different
//! scenario files, not different programs.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use cea_dist::DistSpec;
use cea_stats::ClipMode;

/// A complete analysis scenario
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub run: RunSettings,
    #[serde(default, rename = "quantity")]
    pub quantities: Vec<QuantityConfig>,
    #[serde(default, rename = "report")]
    pub reports: Vec<ReportConfig>,
    #[serde(default, rename = "plot")]
    pub plots: Vec<PlotConfig>,
}

/// Run-wide settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Default sample count for quantities without their own
    #[serde(default = "default_num_samples")]
    pub num_samples: usize,
    /// RNG seed; omit for a fresh entropy seed per run
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory figures are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// When false, reports are still printed but no figure files are written
    #[serde(default = "default_render")]
    pub render: bool,
    /// Bound convention for x-range clipping in plots
    #[serde(default)]
    pub clip_mode: ClipMode,
}

fn default_num_samples() -> usize {
    10000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_render() -> bool {
    true
}

/// One named quantity in the scenario
///
/// Exactly one of `dist`, `empirical`, or `product` must be set. `product`
/// refers to previously defined quantity names; `scale` multiplies any
/// source by a constant.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantityConfig {
    pub name: String,
    /// Override of the run-wide sample count
    #[serde(default)]
    pub num_samples: Option<usize>,
    #[serde(default)]
    pub dist: Option<DistSpec>,
    /// Path to an empirical sample file (JSON or CSV), relative to the
    /// scenario file
    #[serde(default)]
    pub empirical: Option<PathBuf>,
    #[serde(default)]
    pub product: Option<Vec<String>>,
    #[serde(default)]
    pub scale: Option<f64>,
}

/// A console summary-statistics block
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    pub quantity: String,
    /// Heading; defaults to the quantity name
    #[serde(default)]
    pub label: Option<String>,
    /// Percentile points; defaults to [5, 25, 50, 75, 95]
    #[serde(default)]
    pub percentiles: Option<Vec<f64>>,
}

/// One figure to render
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlotConfig {
    /// Histogram + KDE, optionally with a contrasting overlay quantity
    Density {
        quantity: String,
        title: String,
        x_label: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        overlay: Option<String>,
        #[serde(default)]
        overlay_label: Option<String>,
        #[serde(default)]
        bins: Option<usize>,
        #[serde(default)]
        overlay_bins: Option<usize>,
        #[serde(default)]
        xlims: Option<[f64; 2]>,
    },
    /// Log-scale quartile comparison of two quantities
    Boxplot {
        quantities: [String; 2],
        title: String,
        x_label: String,
        #[serde(default)]
        labels: Option<[String; 2]>,
    },
}

/// Structural errors in a scenario
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Quantity '{name}' is defined twice")]
    DuplicateQuantity { name: String },

    #[error("Quantity '{name}' needs exactly one of dist, empirical, or product")]
    AmbiguousSource { name: String },

    #[error("Quantity '{name}' has no dist, empirical, or product source")]
    MissingSource { name: String },

    #[error("{context} refers to unknown quantity '{name}'")]
    UnknownQuantity { name: String, context: String },

    #[error("Product quantity '{name}' refers to '{term}' which is defined later; terms must come first")]
    ForwardReference { name: String, term: String },
}

impl ScenarioConfig {
    /// Check the quantity graph and all references before evaluation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut defined: HashSet<&str> = HashSet::new();

        for q in &self.quantities {
            if !defined.insert(&q.name) {
                return Err(ConfigError::DuplicateQuantity {
                    name: q.name.clone(),
                });
            }
            let sources =
                q.dist.is_some() as u8 + q.empirical.is_some() as u8 + q.product.is_some() as u8;
            match sources {
                0 => {
                    return Err(ConfigError::MissingSource {
                        name: q.name.clone(),
                    })
                }
                1 => {}
                _ => {
                    return Err(ConfigError::AmbiguousSource {
                        name: q.name.clone(),
                    })
                }
            }
            if let Some(terms) = &q.product {
                for term in terms {
                    if term == &q.name {
                        return Err(ConfigError::ForwardReference {
                            name: q.name.clone(),
                            term: term.clone(),
                        });
                    }
                    if !defined.contains(term.as_str()) {
                        // Distinguish "defined later" from "not defined at all"
                        if self.quantities.iter().any(|other| &other.name == term) {
                            return Err(ConfigError::ForwardReference {
                                name: q.name.clone(),
                                term: term.clone(),
                            });
                        }
                        return Err(ConfigError::UnknownQuantity {
                            name: term.clone(),
                            context: format!("Product quantity '{}'", q.name),
                        });
                    }
                }
            }
        }

        for report in &self.reports {
            if !defined.contains(report.quantity.as_str()) {
                return Err(ConfigError::UnknownQuantity {
                    name: report.quantity.clone(),
                    context: "Report block".to_string(),
                });
            }
        }

        for plot in &self.plots {
            for name in plot.quantity_refs() {
                if !defined.contains(name) {
                    return Err(ConfigError::UnknownQuantity {
                        name: name.to_string(),
                        context: format!("Plot '{}'", plot.title()),
                    });
                }
            }
        }

        Ok(())
    }
}

impl PlotConfig {
    pub fn title(&self) -> &str {
        match self {
            PlotConfig::Density { title, .. } | PlotConfig::Boxplot { title, .. } => title,
        }
    }

    /// All quantity names this plot reads
    pub fn quantity_refs(&self) -> Vec<&str> {
        match self {
            PlotConfig::Density {
                quantity, overlay, ..
            } => std::iter::once(quantity.as_str())
                .chain(overlay.as_deref())
                .collect(),
            PlotConfig::Boxplot { quantities, .. } => {
                quantities.iter().map(String::as_str).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(quantities: &str) -> ScenarioConfig {
        let text = format!("[run]\nnum_samples = 100\n{quantities}");
        toml::from_str(&text).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config: ScenarioConfig = toml::from_str("[run]\n").unwrap();
        assert_eq!(config.run.num_samples, 10000);
        assert!(config.run.seed.is_none());
        assert!(config.run.render);
        assert_eq!(config.run.output_dir, PathBuf::from("plots"));
        assert_eq!(config.run.clip_mode, ClipMode::Inclusive);
    }

    #[test]
    fn test_valid_quantity_graph() {
        let config = minimal(
            r#"
[[quantity]]
name = "a"
dist = { kind = "normal", mean = 1.0, sd = 0.5 }

[[quantity]]
name = "b"
dist = { kind = "constant", value = 2.0 }

[[quantity]]
name = "ab"
product = ["a", "b"]
scale = 0.5
"#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duplicate_quantity() {
        let config = minimal(
            r#"
[[quantity]]
name = "a"
dist = { kind = "constant", value = 1.0 }

[[quantity]]
name = "a"
dist = { kind = "constant", value = 2.0 }
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateQuantity { .. })
        ));
    }

    #[test]
    fn test_missing_source() {
        let config = minimal("[[quantity]]\nname = \"a\"\n");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_ambiguous_source() {
        let config = minimal(
            r#"
[[quantity]]
name = "a"
dist = { kind = "constant", value = 1.0 }
product = ["a"]
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AmbiguousSource { .. })
        ));
    }

    #[test]
    fn test_forward_reference() {
        let config = minimal(
            r#"
[[quantity]]
name = "ab"
product = ["a"]

[[quantity]]
name = "a"
dist = { kind = "constant", value = 1.0 }
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ForwardReference { .. })
        ));
    }

    #[test]
    fn test_unknown_report_quantity() {
        let config = minimal(
            r#"
[[quantity]]
name = "a"
dist = { kind = "constant", value = 1.0 }

[[report]]
quantity = "nope"
"#,
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownQuantity { .. })
        ));
    }

    #[test]
    fn test_plot_parsing() {
        let config = minimal(
            r#"
[[quantity]]
name = "a"
dist = { kind = "constant", value = 1.0 }

[[quantity]]
name = "b"
dist = { kind = "constant", value = 2.0 }

[[plot]]
kind = "density"
quantity = "a"
overlay = "b"
title = "Compare"
x_label = "Value"
bins = 40

[[plot]]
kind = "boxplot"
quantities = ["a", "b"]
title = "Boxes"
x_label = "Value"
"#,
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.plots.len(), 2);
        assert_eq!(config.plots[0].quantity_refs(), vec!["a", "b"]);
    }
}
