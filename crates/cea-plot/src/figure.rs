//! Shared figure building blocks: series, colors, title sanitization

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// A labeled sample array to be drawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub samples: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }
}

// Palette matching the original figures
pub(crate) const STEEL_BLUE: RGBColor = RGBColor(176, 196, 222);
pub(crate) const NAVY: RGBColor = RGBColor(0, 0, 128);
pub(crate) const CORAL: RGBColor = RGBColor(240, 128, 128);
pub(crate) const MAROON: RGBColor = RGBColor(128, 0, 0);

/// Figure dimensions in pixels
pub(crate) const FIGURE_SIZE: (u32, u32) = (1400, 700);

/// Turn a figure title into a safe file stem
///
/// Every character outside `[A-Za-z0-9._-]` becomes an underscore, so
/// "Weighted Pain Averted Per Dollar (Zoomed)" saves as
/// `Weighted_Pain_Averted_Per_Dollar__Zoomed_.png`.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
