//! cea-stats - Summary statistics over Monte-Carlo sample arrays
//!
//! This crate provides the numeric half of the analysis pipeline:
//!
//! - **Percentiles**: linear-interpolation percentiles (numpy-compatible)
//! - **SummaryStats**: configurable percentile set plus mean, with a
//!   labeled console report
//! - **Density estimation**: density-normalized histograms and a Gaussian
//!   KDE for plotting
//! - **Clipping**: range filters with configurable bound inclusivity
//!
//! Everything operates on plain `&[f64]` sample arrays so the crate stays
//! independent of how samples were drawn.

pub mod clip;
pub mod density;
pub mod summary;

pub use clip::{clip_samples, ClipMode};
pub use density::{GaussianKde, HistBin, Histogram};
pub use summary::{percentile, SummaryStats, DEFAULT_PERCENTILES};
