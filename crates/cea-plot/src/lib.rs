//! cea-plot - Figure rendering for the cost-effectiveness analysis
//!
//! The only crate in the workspace that depends on the plotting backend.
//! Callers hand over sample arrays, labels, and styling; this crate turns
//! them into PNG files:
//!
//! - [`DensityPlot`]: density-normalized histogram overlaid with a Gaussian
//!   KDE curve. With a single series the 5/25/50/75/95 percentiles are
//!   annotated with staggered dashed lines; with an overlay series the two
//!   densities are drawn in contrasting colors and a legend replaces the
//!   annotations.
//! - [`BoxPlot`]: quartile boxes for two sample arrays compared on a
//!   log-scale axis.
//!
//! Output files are named by sanitizing the figure title.

pub mod boxplot;
pub mod density;
pub mod error;
pub mod figure;

pub use boxplot::BoxPlot;
pub use density::DensityPlot;
pub use error::{PlotError, PlotResult};
pub use figure::{sanitize_title, Series};
