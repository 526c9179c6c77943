//! cea-dist - Distribution model for Monte-Carlo cost-effectiveness analysis
//!
//! This crate provides the sampleable distributions that cost-effectiveness
//! scenarios are built from:
//!
//! - **Parametric**: normal (with optional clip bounds), lognormal, beta, gamma
//! - **Empirical**: discrete distribution over a list of observed values
//! - **Derived**: products of independent distributions and scalar multiples
//!
//! Distributions are described declaratively by [`DistSpec`] (serde-friendly,
//! used in scenario files) and validated into a [`Dist`] which can draw
//! samples from any seedable RNG.

pub mod dist;
pub mod error;
pub mod spec;

pub use dist::Dist;
pub use error::{DistError, DistResult};
pub use spec::DistSpec;
