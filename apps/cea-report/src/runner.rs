//! Scenario execution: reports to stdout, figures to disk

use std::path::Path;

use tracing::info;

use cea_plot::{BoxPlot, DensityPlot, Series};
use cea_stats::{SummaryStats, DEFAULT_PERCENTILES};

use crate::config::{PlotConfig, ScenarioConfig};
use crate::error::ReportError;
use crate::evaluate::EvaluatedScenario;

/// Run a validated scenario end to end
pub fn run(config: &ScenarioConfig, base_dir: &Path) -> Result<(), ReportError> {
    config.validate()?;
    let evaluated = EvaluatedScenario::evaluate(config, base_dir)?;

    for report in &config.reports {
        let samples = evaluated.samples_or_err(&report.quantity, "Report block")?;
        let points = report
            .percentiles
            .clone()
            .unwrap_or_else(|| DEFAULT_PERCENTILES.to_vec());
        let stats = SummaryStats::from_samples(samples, &points);
        let label = report.label.as_deref().unwrap_or(&report.quantity);
        print!("{}", stats.report(label));
        println!();
    }

    if !config.run.render {
        info!(
            figures = config.plots.len(),
            "rendering disabled, skipping figures"
        );
        return Ok(());
    }

    for plot in &config.plots {
        let path = render_plot(config, &evaluated, plot)?;
        info!(figure = %path.display(), "saved");
    }

    Ok(())
}

fn render_plot(
    config: &ScenarioConfig,
    evaluated: &EvaluatedScenario,
    plot: &PlotConfig,
) -> Result<std::path::PathBuf, ReportError> {
    match plot {
        PlotConfig::Density {
            quantity,
            title,
            x_label,
            label,
            overlay,
            overlay_label,
            bins,
            overlay_bins,
            xlims,
        } => {
            let samples = evaluated.samples_or_err(quantity, "Density plot")?;
            let primary = Series::new(
                label.as_deref().unwrap_or(quantity),
                samples.to_vec(),
            );

            let mut figure = DensityPlot::new(title, x_label, primary);
            if let Some(bins) = bins {
                figure = figure.with_bins(*bins);
            }
            if let Some(bins) = overlay_bins {
                figure = figure.with_overlay_bins(*bins);
            }
            if let Some([lo, hi]) = xlims {
                figure = figure.with_clip((*lo, *hi), config.run.clip_mode);
            }
            if let Some(overlay_name) = overlay {
                let overlay_samples = evaluated.samples_or_err(overlay_name, "Density plot")?;
                figure = figure.with_overlay(Series::new(
                    overlay_label.as_deref().unwrap_or(overlay_name),
                    overlay_samples.to_vec(),
                ));
            }

            Ok(figure.save(&config.run.output_dir)?)
        }
        PlotConfig::Boxplot {
            quantities,
            title,
            x_label,
            labels,
        } => {
            let [first_name, second_name] = quantities;
            let first = evaluated.samples_or_err(first_name, "Box plot")?;
            let second = evaluated.samples_or_err(second_name, "Box plot")?;
            let (first_label, second_label) = match labels {
                Some([a, b]) => (a.as_str(), b.as_str()),
                None => (first_name.as_str(), second_name.as_str()),
            };

            let figure = BoxPlot::new(
                title,
                x_label,
                Series::new(first_label, first.to_vec()),
                Series::new(second_label, second.to_vec()),
            );
            Ok(figure.save(&config.run.output_dir)?)
        }
    }
}
