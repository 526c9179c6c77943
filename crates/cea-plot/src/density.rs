//! Density figures: histogram + KDE with optional overlay or quantile lines

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use cea_stats::{clip_samples, percentile, ClipMode, GaussianKde, Histogram};

use crate::error::{PlotError, PlotResult};
use crate::figure::{sanitize_title, Series, CORAL, FIGURE_SIZE, MAROON, NAVY, STEEL_BLUE};

/// Annotated percentile points with their staggered line heights,
/// matching the layout of the original figures
const QUANTILE_LAYOUT: [(f64, f64, &str); 5] = [
    (5.0, 0.16, "5th"),
    (25.0, 0.26, "25th"),
    (50.0, 0.36, "50th"),
    (75.0, 0.46, "75th"),
    (95.0, 0.56, "95th Percentile"),
];

/// A density figure: histogram + KDE for one series, with either
/// percentile annotations (single series) or a contrasting overlay series
#[derive(Debug, Clone)]
pub struct DensityPlot {
    pub title: String,
    pub x_label: String,
    pub primary: Series,
    /// Second series drawn in contrasting colors. When present, percentile
    /// annotation is skipped and a legend is drawn instead.
    pub overlay: Option<Series>,
    pub bins: usize,
    pub overlay_bins: usize,
    /// Clip both series to this x-range before binning
    pub x_clip: Option<(f64, f64)>,
    pub clip_mode: ClipMode,
}

impl DensityPlot {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, primary: Series) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            primary,
            overlay: None,
            bins: 25,
            overlay_bins: 25,
            x_clip: None,
            clip_mode: ClipMode::default(),
        }
    }

    pub fn with_overlay(mut self, overlay: Series) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_overlay_bins(mut self, bins: usize) -> Self {
        self.overlay_bins = bins;
        self
    }

    pub fn with_clip(mut self, bounds: (f64, f64), mode: ClipMode) -> Self {
        self.x_clip = Some(bounds);
        self.clip_mode = mode;
        self
    }

    /// Render the figure and save it as `<out_dir>/<sanitized-title>.png`
    pub fn save(&self, out_dir: &Path) -> PlotResult<PathBuf> {
        std::fs::create_dir_all(out_dir).map_err(|source| PlotError::OutputDir {
            path: out_dir.to_path_buf(),
            source,
        })?;
        let path = out_dir.join(format!("{}.png", sanitize_title(&self.title)));

        let primary = self.prepare(&self.primary, self.bins)?;
        let overlay = self
            .overlay
            .as_ref()
            .map(|s| self.prepare(s, self.overlay_bins))
            .transpose()?;

        let (x_lo, x_hi) = self.x_range(&primary, overlay.as_ref());
        let y_max = Self::y_range(&primary, overlay.as_ref(), x_lo, x_hi);

        let root = BitMapBackend::new(&path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 34))
            .margin(20)
            .x_label_area_size(55)
            .y_label_area_size(65)
            .build_cartesian_2d(x_lo..x_hi, 0.0..y_max)
            .map_err(backend)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&self.x_label)
            .y_desc("Probability Density")
            .axis_desc_style(("sans-serif", 18))
            .label_style(("sans-serif", 14))
            .draw()
            .map_err(backend)?;

        Self::draw_series(
            &mut chart,
            &primary,
            STEEL_BLUE,
            NAVY,
            self.overlay.is_some(),
        )?;
        if let Some(overlay) = &overlay {
            Self::draw_series(&mut chart, overlay, CORAL, MAROON, true)?;
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 16))
                .draw()
                .map_err(backend)?;
        } else {
            self.annotate_quantiles(&mut chart, &primary.samples, y_max)?;
        }

        root.present().map_err(backend)?;
        drop(chart);
        drop(root);
        Ok(path)
    }

    /// Clip a series and precompute its histogram and KDE
    fn prepare(&self, series: &Series, bins: usize) -> PlotResult<Prepared> {
        let samples = match self.x_clip {
            Some(bounds) => clip_samples(&series.samples, bounds, self.clip_mode),
            None => series.samples.clone(),
        };
        let histogram = Histogram::new(&samples, bins);
        if histogram.is_empty() {
            return Err(PlotError::EmptySeries {
                label: series.label.clone(),
            });
        }
        let kde = GaussianKde::new(&samples);
        Ok(Prepared {
            label: series.label.clone(),
            samples,
            histogram,
            kde,
        })
    }

    fn x_range(&self, primary: &Prepared, overlay: Option<&Prepared>) -> (f64, f64) {
        if let Some((lo, hi)) = self.x_clip {
            return (lo, hi);
        }
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for p in std::iter::once(primary).chain(overlay) {
            for &x in &p.samples {
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
        if lo >= hi {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        }
    }

    fn y_range(primary: &Prepared, overlay: Option<&Prepared>, x_lo: f64, x_hi: f64) -> f64 {
        let mut y_max: f64 = 0.0;
        for p in std::iter::once(primary).chain(overlay) {
            y_max = y_max.max(p.histogram.max_density());
            for (_, y) in p.kde.curve(x_lo, x_hi, 100) {
                y_max = y_max.max(y);
            }
        }
        if y_max > 0.0 {
            y_max * 1.15
        } else {
            1.0
        }
    }

    fn draw_series(
        chart: &mut Chart<'_, '_>,
        prepared: &Prepared,
        fill: RGBColor,
        line: RGBColor,
        with_legend: bool,
    ) -> PlotResult<()> {
        let bars = prepared.histogram.bins().iter().map(|b| {
            Rectangle::new([(b.lo, 0.0), (b.hi, b.density)], fill.mix(0.65).filled())
        });
        let anno = chart.draw_series(bars).map_err(backend)?;
        if with_legend {
            anno.label(&prepared.label).legend(move |(x, y)| {
                Rectangle::new([(x - 8, y - 6), (x + 8, y + 6)], fill.mix(0.65).filled())
            });
        }

        let (x_lo, x_hi) = {
            let r = chart.x_range();
            (r.start, r.end)
        };
        chart
            .draw_series(LineSeries::new(
                prepared.kde.curve(x_lo, x_hi, 300),
                line.stroke_width(2),
            ))
            .map_err(backend)?;
        Ok(())
    }

    /// Dashed vertical percentile lines with staggered heights and labels
    fn annotate_quantiles(
        &self,
        chart: &mut Chart<'_, '_>,
        samples: &[f64],
        y_max: f64,
    ) -> PlotResult<()> {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return Ok(());
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        for (p, height, label) in QUANTILE_LAYOUT {
            let q = percentile(&sorted, p);
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(q, 0.0), (q, y_max * height)],
                    4,
                    4,
                    BLACK.mix(0.6).stroke_width(1),
                ))
                .map_err(backend)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    label.to_string(),
                    (q, y_max * (height + 0.01)),
                    ("sans-serif", 16).into_font().color(&BLACK.mix(0.85)),
                )))
                .map_err(backend)?;
        }
        Ok(())
    }
}

/// A clipped series with its precomputed density estimators
struct Prepared {
    label: String,
    samples: Vec<f64>,
    histogram: Histogram,
    kde: GaussianKde,
}

type Chart<'a, 'b> = ChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>,
>;

fn backend<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn normal_samples(n: usize, seed: u64) -> Vec<f64> {
        let normal = Normal::new(100.0, 10.0).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    fn temp_out_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cea_plot_test_{}_{tag}", std::process::id()))
    }

    #[test]
    fn test_density_plot_saves_png() {
        let out_dir = temp_out_dir("single");
        let plot = DensityPlot::new(
            "Test Plot",
            "Value",
            Series::new("Samples", normal_samples(2000, 1)),
        );
        let path = plot.save(&out_dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "Test_Plot.png");
        assert!(path.exists());
        std::fs::remove_dir_all(&out_dir).ok();
    }

    #[test]
    fn test_density_plot_with_overlay() {
        let out_dir = temp_out_dir("overlay");
        let plot = DensityPlot::new(
            "Overlay Plot",
            "Value",
            Series::new("First", normal_samples(2000, 2)),
        )
        .with_overlay(Series::new("Second", normal_samples(2000, 3)))
        .with_bins(50)
        .with_overlay_bins(30);
        let path = plot.save(&out_dir).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&out_dir).ok();
    }

    #[test]
    fn test_zero_mean_overlay_is_drawn() {
        // The original implementation inferred overlay presence from a
        // nonzero mean; a zero-mean overlay must still render.
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let zero_mean: Vec<f64> = (0..2000).map(|_| normal.sample(&mut rng)).collect();

        let out_dir = temp_out_dir("zero_mean");
        let plot = DensityPlot::new(
            "Zero Mean Overlay",
            "Value",
            Series::new("First", normal_samples(2000, 5)),
        )
        .with_overlay(Series::new("Centered", zero_mean));
        assert!(plot.overlay.is_some());
        let path = plot.save(&out_dir).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&out_dir).ok();
    }

    #[test]
    fn test_clip_empties_series() {
        let out_dir = temp_out_dir("clipped_out");
        let plot = DensityPlot::new(
            "Clipped Away",
            "Value",
            Series::new("Samples", normal_samples(500, 6)),
        )
        .with_clip((1e6, 2e6), ClipMode::Inclusive);
        let result = plot.save(&out_dir);
        assert!(matches!(result, Err(PlotError::EmptySeries { .. })));
        std::fs::remove_dir_all(&out_dir).ok();
    }
}
