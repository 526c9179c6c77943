//! Declarative distribution specifications
//!
//! [`DistSpec`] is the serde-facing description of a distribution, used in
//! scenario files. It carries raw parameters only; validation happens when
//! the spec is turned into a sampleable [`Dist`](crate::Dist).

use serde::{Deserialize, Serialize};

/// A declarative distribution specification
///
/// Tagged by `kind` in configuration files, e.g.
/// `{ kind = "normal", mean = 14796.0, sd = 7708.0, lclip = 0.0 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DistSpec {
    /// Normal distribution, optionally truncated to `[lclip, rclip]`
    Normal {
        mean: f64,
        sd: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lclip: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rclip: Option<f64>,
    },

    /// Lognormal distribution parameterized in log space
    ///
    /// `mu` and `sigma` are the mean and standard deviation of the
    /// underlying normal, i.e. of `ln(X)`.
    Lognormal { mu: f64, sigma: f64 },

    /// Beta distribution on `[0, 1]`
    Beta { alpha: f64, beta: f64 },

    /// Gamma distribution with shape and scale parameters
    Gamma { shape: f64, scale: f64 },

    /// Discrete empirical distribution: uniform draw with replacement
    /// from a list of observed values
    Empirical { values: Vec<f64> },

    /// Degenerate distribution that always yields `value`
    Constant { value: f64 },
}
