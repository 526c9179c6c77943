//! Range clipping for sample arrays
//!
//! The analysis clips samples to an x-range before plotting. Source
//! revisions of the original analysis disagreed on whether the bounds are
//! inclusive or exclusive, so the convention is an explicit parameter.
//! [`ClipMode::Inclusive`] is the default.

use serde::{Deserialize, Serialize};

/// Bound convention for range clipping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// Retain samples with `lo <= x <= hi`
    #[default]
    Inclusive,
    /// Retain samples with `lo < x < hi`
    Exclusive,
}

/// Retain the samples inside `[lo, hi]` under the given convention
pub fn clip_samples(samples: &[f64], bounds: (f64, f64), mode: ClipMode) -> Vec<f64> {
    let (lo, hi) = bounds;
    samples
        .iter()
        .copied()
        .filter(|&x| match mode {
            ClipMode::Inclusive => x >= lo && x <= hi,
            ClipMode::Exclusive => x > lo && x < hi,
        })
        .collect()
}
