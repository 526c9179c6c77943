//! Quantity graph evaluation
//!
//! Each named quantity is built into a distribution and sampled exactly
//! once per run. The sample arrays are cached here and shared by every
//! report and plot block that refers to the quantity, so nothing is ever
//! re-sampled.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use cea_dist::Dist;
use cea_io::load_samples;

use crate::config::{ConfigError, ScenarioConfig};
use crate::error::ReportError;

/// Sample arrays for every quantity in a scenario
pub struct EvaluatedScenario {
    samples: HashMap<String, Vec<f64>>,
}

impl EvaluatedScenario {
    /// Build and sample every quantity, in definition order
    ///
    /// `base_dir` anchors relative empirical file paths. Expects a
    /// validated configuration; product terms must already be defined.
    pub fn evaluate(config: &ScenarioConfig, base_dir: &Path) -> Result<Self, ReportError> {
        let mut rng = match config.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut dists: HashMap<String, Dist> = HashMap::new();
        let mut samples: HashMap<String, Vec<f64>> = HashMap::new();

        for q in &config.quantities {
            let mut dist = if let Some(spec) = &q.dist {
                Dist::from_spec(spec)?
            } else if let Some(path) = &q.empirical {
                let resolved = base_dir.join(path);
                debug!(quantity = %q.name, path = %resolved.display(), "loading empirical samples");
                Dist::empirical(load_samples(&resolved)?)?
            } else if let Some(terms) = &q.product {
                let terms = terms
                    .iter()
                    .map(|term| {
                        dists.get(term).cloned().ok_or_else(|| {
                            ConfigError::UnknownQuantity {
                                name: term.clone(),
                                context: format!("Product quantity '{}'", q.name),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Dist::product(terms)?
            } else {
                return Err(ConfigError::MissingSource {
                    name: q.name.clone(),
                }
                .into());
            };

            if let Some(factor) = q.scale {
                dist = dist.scale(factor);
            }

            let n = q.num_samples.unwrap_or(config.run.num_samples);
            debug!(quantity = %q.name, samples = n, "sampling");
            samples.insert(q.name.clone(), dist.sample(&mut rng, n));
            dists.insert(q.name.clone(), dist);
        }

        Ok(Self { samples })
    }

    /// Cached sample array for a quantity
    pub fn samples(&self, name: &str) -> Option<&[f64]> {
        self.samples.get(name).map(Vec::as_slice)
    }

    /// Cached samples, or the error a validated config should have caught
    pub fn samples_or_err(&self, name: &str, context: &str) -> Result<&[f64], ReportError> {
        self.samples(name).ok_or_else(|| {
            ConfigError::UnknownQuantity {
                name: name.to_string(),
                context: context.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use std::path::PathBuf;

    fn parse(text: &str) -> ScenarioConfig {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_product_of_constant_and_normal() {
        let config = parse(
            r#"
[run]
num_samples = 20000
seed = 7

[[quantity]]
name = "base"
dist = { kind = "normal", mean = 100.0, sd = 10.0, lclip = 0.0 }

[[quantity]]
name = "two_thirds"
dist = { kind = "constant", value = 0.6666666666666666 }

[[quantity]]
name = "scaled"
product = ["two_thirds", "base"]
"#,
        );
        config.validate().unwrap();
        let evaluated = EvaluatedScenario::evaluate(&config, Path::new(".")).unwrap();

        let base = evaluated.samples("base").unwrap();
        let scaled = evaluated.samples("scaled").unwrap();
        assert_eq!(base.len(), 20000);
        assert_eq!(scaled.len(), 20000);

        let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
        assert!((mean(base) - 100.0).abs() < 0.5);
        assert!((mean(scaled) - 200.0 / 3.0).abs() < 0.5);
    }

    #[test]
    fn test_per_quantity_sample_count_override() {
        let config = parse(
            r#"
[run]
num_samples = 100
seed = 1

[[quantity]]
name = "a"
num_samples = 500
dist = { kind = "constant", value = 1.0 }
"#,
        );
        let evaluated = EvaluatedScenario::evaluate(&config, Path::new(".")).unwrap();
        assert_eq!(evaluated.samples("a").unwrap().len(), 500);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let text = r#"
[run]
num_samples = 1000
seed = 42

[[quantity]]
name = "g"
dist = { kind = "gamma", shape = 1.7, scale = 1.0 }
scale = 8760.0
"#;
        let a = EvaluatedScenario::evaluate(&parse(text), Path::new(".")).unwrap();
        let b = EvaluatedScenario::evaluate(&parse(text), Path::new(".")).unwrap();
        assert_eq!(a.samples("g").unwrap(), b.samples("g").unwrap());
    }

    #[test]
    fn test_empirical_quantity_from_json() {
        let dir = std::env::temp_dir().join(format!("cea_eval_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("weights.json"), "[0.25, 0.5, 1.0]").unwrap();

        let config = parse(
            r#"
[run]
num_samples = 1000
seed = 3

[[quantity]]
name = "w"
empirical = "weights.json"
"#,
        );
        let evaluated = EvaluatedScenario::evaluate(&config, &dir).unwrap();
        let samples = evaluated.samples("w").unwrap();
        assert!(samples.iter().all(|x| [0.25, 0.5, 1.0].contains(x)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_empirical_file_is_fatal() {
        let config = parse(
            r#"
[run]
num_samples = 10

[[quantity]]
name = "w"
empirical = "no_such_file.json"
"#,
        );
        let result = EvaluatedScenario::evaluate(&config, &PathBuf::from("/nonexistent"));
        assert!(matches!(result, Err(ReportError::Load(_))));
    }
}
