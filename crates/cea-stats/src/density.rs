//! Density estimation: histograms and Gaussian KDE
//!
//! Both estimators are density-normalized so a histogram and the KDE of
//! the same sample array can share a y axis.

use serde::{Deserialize, Serialize};

/// One histogram bin with its density height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistBin {
    pub lo: f64,
    pub hi: f64,
    /// `count / (n * bin_width)` - integrates to 1 over all bins
    pub density: f64,
}

/// Density-normalized histogram over equal-width bins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<HistBin>,
}

impl Histogram {
    /// Bin samples into `num_bins` equal-width bins spanning the data range
    ///
    /// Non-finite samples are ignored. Degenerate inputs (no finite
    /// samples, or zero range) produce an empty histogram.
    pub fn new(samples: &[f64], num_bins: usize) -> Self {
        let finite: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        if finite.is_empty() || num_bins == 0 {
            return Self { bins: Vec::new() };
        }

        let min = finite.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / num_bins as f64;
        if width <= 0.0 {
            return Self { bins: Vec::new() };
        }

        let mut counts = vec![0usize; num_bins];
        for &x in &finite {
            let idx = (((x - min) / width) as usize).min(num_bins - 1);
            counts[idx] += 1;
        }

        let n = finite.len() as f64;
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, c)| HistBin {
                lo: min + i as f64 * width,
                hi: min + (i + 1) as f64 * width,
                density: c as f64 / (n * width),
            })
            .collect();

        Self { bins }
    }

    pub fn bins(&self) -> &[HistBin] {
        &self.bins
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Tallest bin density (0 for an empty histogram)
    pub fn max_density(&self) -> f64 {
        self.bins.iter().map(|b| b.density).fold(0.0, f64::max)
    }
}

/// Gaussian kernel density estimate with Silverman's bandwidth
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to the finite samples
    ///
    /// Bandwidth is Silverman's rule of thumb,
    /// `0.9 * min(sigma, iqr / 1.34) * n^(-1/5)`, with a fallback for
    /// degenerate (zero-spread) data.
    pub fn new(samples: &[f64]) -> Self {
        let mut finite: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        finite.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let n = finite.len();
        if n < 2 {
            return Self {
                samples: finite,
                bandwidth: 1.0,
            };
        }

        let mean = finite.iter().sum::<f64>() / n as f64;
        let sigma =
            (finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64).sqrt();
        let iqr = crate::summary::percentile(&finite, 75.0) - crate::summary::percentile(&finite, 25.0);

        let spread = if iqr > 0.0 {
            sigma.min(iqr / 1.34)
        } else {
            sigma
        };
        let bandwidth = if spread > 0.0 {
            0.9 * spread * (n as f64).powf(-0.2)
        } else {
            1.0
        };

        Self {
            samples: finite,
            bandwidth,
        }
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimated density at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * self.bandwidth);
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let z = (x - xi) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum / self.samples.len() as f64
    }

    /// Evaluate the density on an even grid, for plotting
    pub fn curve(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        if points < 2 || hi <= lo {
            return Vec::new();
        }
        let step = (hi - lo) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                (x, self.evaluate(x))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let samples: Vec<f64> = (0..1000).map(|i| i as f64 / 100.0).collect();
        let hist = Histogram::new(&samples, 25);
        let integral: f64 = hist.bins().iter().map(|b| b.density * (b.hi - b.lo)).sum();
        assert!((integral - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_bin_count() {
        let samples: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let hist = Histogram::new(&samples, 10);
        assert_eq!(hist.bins().len(), 10);
        assert_eq!(hist.bins()[0].lo, 0.0);
        assert!((hist.bins()[9].hi - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(Histogram::new(&[], 10).is_empty());
        assert!(Histogram::new(&[5.0, 5.0, 5.0], 10).is_empty());
        assert!(Histogram::new(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_kde_peak_near_mode() {
        // Tight cluster at 10 with a far outlier: density at 10 must
        // dominate density at the outlier
        let mut samples = vec![9.8, 9.9, 10.0, 10.0, 10.1, 10.2];
        samples.push(50.0);
        let kde = GaussianKde::new(&samples);
        assert!(kde.evaluate(10.0) > kde.evaluate(30.0));
        assert!(kde.evaluate(10.0) > kde.evaluate(50.0));
    }

    #[test]
    fn test_kde_curve_grid() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let kde = GaussianKde::new(&samples);
        let curve = kde.curve(0.0, 6.0, 61);
        assert_eq!(curve.len(), 61);
        assert_eq!(curve[0].0, 0.0);
        assert!((curve[60].0 - 6.0).abs() < 1e-9);
        assert!(curve.iter().all(|&(_, y)| y >= 0.0));
    }

    #[test]
    fn test_kde_approximately_integrates_to_one() {
        let samples: Vec<f64> = (0..200).map(|i| (i % 20) as f64).collect();
        let kde = GaussianKde::new(&samples);
        let curve = kde.curve(-10.0, 30.0, 401);
        let step = 40.0 / 400.0;
        let integral: f64 = curve.iter().map(|&(_, y)| y * step).sum();
        assert!((integral - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_kde_degenerate_data() {
        let kde = GaussianKde::new(&[]);
        assert_eq!(kde.evaluate(0.0), 0.0);
        let kde = GaussianKde::new(&[3.0, 3.0, 3.0]);
        assert!(kde.evaluate(3.0) > 0.0);
    }
}
