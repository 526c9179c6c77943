//! Error types for figure rendering

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while rendering or saving a figure
#[derive(Error, Debug)]
pub enum PlotError {
    /// A series had no samples left to draw (possibly after clipping)
    #[error("Series '{label}' has no samples to plot")]
    EmptySeries { label: String },

    /// Log-scale axes need at least one positive sample
    #[error("Series '{label}' has no positive samples for a log-scale axis")]
    NoPositiveSamples { label: String },

    /// Output directory could not be created
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Drawing backend failure
    #[error("Rendering failed: {0}")]
    Backend(String),
}

/// Result type alias for rendering operations
pub type PlotResult<T> = Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_display() {
        let err = PlotError::EmptySeries {
            label: "Shrimp".to_string(),
        };
        assert!(err.to_string().contains("Shrimp"));
    }
}
