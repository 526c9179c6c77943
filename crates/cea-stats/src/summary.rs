//! Percentiles and summary statistics
//!
//! Percentile computation uses linear interpolation between closest ranks
//! (numpy's default `linear` method), so reports match the original
//! analysis outputs.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Percentile points reported by default
pub const DEFAULT_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Compute the `p`-th percentile (0-100) of pre-sorted samples
///
/// Linear interpolation between closest ranks. `sorted` must be sorted
/// ascending and non-empty; NaNs must already be filtered out.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Summary statistics for a sample array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Percentile points requested (0-100)
    pub percentile_points: Vec<f64>,
    /// Percentile values, one per requested point, non-decreasing
    pub percentile_values: Vec<f64>,
    /// Arithmetic mean
    pub mean: f64,
    /// Number of finite samples used
    pub count: usize,
    /// Number of non-finite samples dropped
    pub missing: usize,
}

impl SummaryStats {
    /// Compute statistics from samples at the given percentile points
    ///
    /// Non-finite samples are dropped. With no finite samples, percentile
    /// values and the mean are NaN.
    pub fn from_samples(samples: &[f64], points: &[f64]) -> Self {
        let mut finite: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = samples.len() - finite.len();

        if finite.is_empty() {
            return Self {
                percentile_points: points.to_vec(),
                percentile_values: vec![f64::NAN; points.len()],
                mean: f64::NAN,
                count: 0,
                missing,
            };
        }

        finite.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mean = finite.iter().sum::<f64>() / finite.len() as f64;
        let percentile_values = points.iter().map(|&p| percentile(&finite, p)).collect();

        Self {
            percentile_points: points.to_vec(),
            percentile_values,
            mean,
            count: finite.len(),
            missing,
        }
    }

    /// Percentile value for an exact requested point, if it was requested
    pub fn value_at(&self, point: f64) -> Option<f64> {
        self.percentile_points
            .iter()
            .position(|&p| p == point)
            .map(|i| self.percentile_values[i])
    }

    /// Labeled console report block
    ///
    /// Mirrors the report layout of the original analysis:
    /// header, percentile list, values, mean.
    pub fn report(&self, name: &str) -> String {
        let points = self
            .percentile_points
            .iter()
            .map(|&p| ordinal(p))
            .collect::<Vec<_>>()
            .join(", ");
        let values = self
            .percentile_values
            .iter()
            .map(|v| format!("{v:.6}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = String::new();
        let _ = writeln!(out, "Summary Statistics: {name}");
        let _ = writeln!(out, "{points} percentiles:");
        let _ = writeln!(out, "[{values}]");
        let _ = writeln!(out, "Mean:");
        let _ = writeln!(out, " {:.6}", self.mean);
        out
    }
}

/// Ordinal label for a percentile point: 5 -> "5th", 25 -> "25th"
fn ordinal(p: f64) -> String {
    if p.fract() != 0.0 {
        return format!("{p}th");
    }
    let n = p as i64;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
