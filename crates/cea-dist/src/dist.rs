//! Validated, sampleable distributions
//!
//! [`Dist`] is the runtime form of a [`DistSpec`]: parameters have been
//! validated, and the underlying samplers are ready to draw. Derived
//! distributions (products of independent terms, scalar multiples) are
//! built with [`Dist::product`] and [`Dist::scale`].

use rand::Rng;
use rand_distr::{Beta, Distribution, Gamma, LogNormal, Normal};

use crate::error::{DistError, DistResult};
use crate::spec::DistSpec;

/// Attempts at rejection sampling before falling back to clamping.
/// Keeps pathological clip bounds (almost no mass inside) from hanging.
const MAX_CLIP_ATTEMPTS: u32 = 1000;

/// A validated, sampleable distribution
#[derive(Debug, Clone)]
pub enum Dist {
    /// Normal, optionally truncated by resample-rejection
    Normal {
        inner: Normal<f64>,
        lclip: Option<f64>,
        rclip: Option<f64>,
    },
    /// Lognormal parameterized in log space
    Lognormal(LogNormal<f64>),
    /// Beta on `[0, 1]`
    Beta(Beta<f64>),
    /// Gamma with shape/scale
    Gamma(Gamma<f64>),
    /// Discrete empirical: uniform draw with replacement
    Empirical(Vec<f64>),
    /// Degenerate point mass
    Constant(f64),
    /// Product of independent terms
    Product(Vec<Dist>),
    /// Scalar multiple of another distribution
    Scaled { inner: Box<Dist>, factor: f64 },
}

impl Dist {
    /// Validate a specification into a sampleable distribution
    pub fn from_spec(spec: &DistSpec) -> DistResult<Self> {
        match spec {
            DistSpec::Normal {
                mean,
                sd,
                lclip,
                rclip,
            } => {
                if let (Some(lo), Some(hi)) = (lclip, rclip) {
                    if lo > hi {
                        return Err(DistError::EmptyClip {
                            lclip: *lo,
                            rclip: *hi,
                        });
                    }
                }
                let inner = Normal::new(*mean, *sd).map_err(|e| DistError::InvalidParams {
                    dist: "normal",
                    message: e.to_string(),
                })?;
                Ok(Dist::Normal {
                    inner,
                    lclip: *lclip,
                    rclip: *rclip,
                })
            }
            DistSpec::Lognormal { mu, sigma } => {
                let inner = LogNormal::new(*mu, *sigma).map_err(|e| DistError::InvalidParams {
                    dist: "lognormal",
                    message: e.to_string(),
                })?;
                Ok(Dist::Lognormal(inner))
            }
            DistSpec::Beta { alpha, beta } => {
                let inner = Beta::new(*alpha, *beta).map_err(|e| DistError::InvalidParams {
                    dist: "beta",
                    message: e.to_string(),
                })?;
                Ok(Dist::Beta(inner))
            }
            DistSpec::Gamma { shape, scale } => {
                let inner = Gamma::new(*shape, *scale).map_err(|e| DistError::InvalidParams {
                    dist: "gamma",
                    message: e.to_string(),
                })?;
                Ok(Dist::Gamma(inner))
            }
            DistSpec::Empirical { values } => Self::empirical(values.clone()),
            DistSpec::Constant { value } => Ok(Dist::Constant(*value)),
        }
    }

    /// Discrete empirical distribution over observed values
    pub fn empirical(values: Vec<f64>) -> DistResult<Self> {
        if values.is_empty() {
            return Err(DistError::EmptyEmpirical);
        }
        Ok(Dist::Empirical(values))
    }

    /// Product of independent distributions
    ///
    /// Each draw multiplies one fresh sample from every term.
    pub fn product(terms: Vec<Dist>) -> DistResult<Self> {
        if terms.is_empty() {
            return Err(DistError::EmptyProduct);
        }
        Ok(Dist::Product(terms))
    }

    /// Scalar multiple of this distribution
    pub fn scale(self, factor: f64) -> Self {
        // Collapse nested scalings so long product chains stay flat
        match self {
            Dist::Scaled { inner, factor: f } => Dist::Scaled {
                inner,
                factor: f * factor,
            },
            Dist::Constant(v) => Dist::Constant(v * factor),
            other => Dist::Scaled {
                inner: Box::new(other),
                factor,
            },
        }
    }

    /// Draw a single sample
    pub fn draw_one<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Dist::Normal {
                inner,
                lclip,
                rclip,
            } => {
                if lclip.is_none() && rclip.is_none() {
                    return inner.sample(rng);
                }
                let lo = lclip.unwrap_or(f64::NEG_INFINITY);
                let hi = rclip.unwrap_or(f64::INFINITY);
                for _ in 0..MAX_CLIP_ATTEMPTS {
                    let x = inner.sample(rng);
                    if x >= lo && x <= hi {
                        return x;
                    }
                }
                inner.sample(rng).clamp(lo, hi)
            }
            Dist::Lognormal(inner) => inner.sample(rng),
            Dist::Beta(inner) => inner.sample(rng),
            Dist::Gamma(inner) => inner.sample(rng),
            Dist::Empirical(values) => values[rng.gen_range(0..values.len())],
            Dist::Constant(value) => *value,
            Dist::Product(terms) => terms.iter().map(|t| t.draw_one(rng)).product(),
            Dist::Scaled { inner, factor } => inner.draw_one(rng) * factor,
        }
    }

    /// Draw `n` samples
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.draw_one(rng)).collect()
    }
}
