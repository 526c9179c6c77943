//! cea-io - Loading empirical sample files
//!
//! The moral-weight inputs to the analysis are empirical distributions
//! exported from upstream models as flat lists of floats. This crate loads
//! them from:
//!
//! - **JSON**: a single array of numbers (`[0.012, 0.44, ...]`)
//! - **CSV**: one value per record, first field (no header)
//!
//! There is no further schema. Any failure (missing file, parse error,
//! empty list) is fatal to the analysis run.

pub mod loader;

pub use loader::{load_samples, LoadError, LoadResult};
