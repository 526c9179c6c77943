//! Error types for distribution construction and sampling

use thiserror::Error;

/// Errors raised when a distribution specification cannot be validated
#[derive(Error, Debug)]
pub enum DistError {
    /// A parametric distribution was given out-of-domain parameters
    #[error("Invalid {dist} parameters: {message}")]
    InvalidParams { dist: &'static str, message: String },

    /// An empirical distribution needs at least one value
    #[error("Empirical distribution has no values")]
    EmptyEmpirical,

    /// A product distribution needs at least one term
    #[error("Product distribution has no terms")]
    EmptyProduct,

    /// Clip bounds must describe a non-empty interval
    #[error("Clip bounds are empty: lclip {lclip} > rclip {rclip}")]
    EmptyClip { lclip: f64, rclip: f64 },
}

/// Result type alias for distribution operations
pub type DistResult<T> = Result<T, DistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_display() {
        let err = DistError::InvalidParams {
            dist: "normal",
            message: "standard deviation must be finite".to_string(),
        };
        assert!(err.to_string().contains("normal"));
        assert!(err.to_string().contains("standard deviation"));
    }

    #[test]
    fn test_empty_clip_display() {
        let err = DistError::EmptyClip {
            lclip: 2.0,
            rclip: 1.0,
        };
        assert!(err.to_string().contains('2'));
    }
}
