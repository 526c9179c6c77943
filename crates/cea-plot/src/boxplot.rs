//! Log-scale box-plot comparison between two sample arrays

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::{PlotError, PlotResult};
use crate::figure::{sanitize_title, Series, FIGURE_SIZE, MAROON, NAVY};

/// Quartile boxes for two causes compared on a log-scale value axis
///
/// Outcome distributions in the analysis span several orders of magnitude,
/// so the comparison axis is logarithmic. Non-positive samples cannot be
/// placed on a log axis and are dropped before computing quartiles.
#[derive(Debug, Clone)]
pub struct BoxPlot {
    pub title: String,
    pub x_label: String,
    pub first: Series,
    pub second: Series,
}

impl BoxPlot {
    pub fn new(
        title: impl Into<String>,
        x_label: impl Into<String>,
        first: Series,
        second: Series,
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            first,
            second,
        }
    }

    /// Render the figure and save it as `<out_dir>/<sanitized-title>.png`
    pub fn save(&self, out_dir: &Path) -> PlotResult<PathBuf> {
        std::fs::create_dir_all(out_dir).map_err(|source| PlotError::OutputDir {
            path: out_dir.to_path_buf(),
            source,
        })?;
        let path = out_dir.join(format!("{}.png", sanitize_title(&self.title)));

        let first = positive_samples(&self.first)?;
        let second = positive_samples(&self.second)?;

        let all = first.iter().chain(&second);
        let min = all.clone().cloned().fold(f32::INFINITY, f32::min);
        let max = all.cloned().fold(f32::NEG_INFINITY, f32::max);
        let (x_lo, x_hi) = (min * 0.5, max * 2.0);

        let labels: Vec<&str> = vec![self.first.label.as_str(), self.second.label.as_str()];
        let quartiles = [Quartiles::new(&first), Quartiles::new(&second)];

        let root = BitMapBackend::new(&path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 34))
            .margin(20)
            .x_label_area_size(55)
            .y_label_area_size(140)
            .build_cartesian_2d((x_lo..x_hi).log_scale(), labels[..].into_segmented())
            .map_err(backend)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(&self.x_label)
            .axis_desc_style(("sans-serif", 18))
            .label_style(("sans-serif", 14))
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(label) => label.to_string(),
                _ => String::new(),
            })
            .y_labels(labels.len())
            .draw()
            .map_err(backend)?;

        for (i, (label, quartile)) in labels.iter().zip(&quartiles).enumerate() {
            let color = if i == 0 { NAVY } else { MAROON };
            chart
                .draw_series(std::iter::once(
                    Boxplot::new_horizontal(SegmentValue::CenterOf(label), quartile)
                        .width(60)
                        .whisker_width(0.5)
                        .style(color),
                ))
                .map_err(backend)?;
        }

        root.present().map_err(backend)?;
        drop(chart);
        drop(root);
        Ok(path)
    }
}

/// Keep the finite, strictly positive samples of a series as f32
fn positive_samples(series: &Series) -> PlotResult<Vec<f32>> {
    let positive: Vec<f32> = series
        .samples
        .iter()
        .filter(|x| x.is_finite() && **x > 0.0)
        .map(|&x| x as f32)
        .collect();
    if positive.is_empty() {
        return Err(PlotError::NoPositiveSamples {
            label: series.label.clone(),
        });
    }
    Ok(positive)
}

fn backend<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Backend(e.to_string())
}
