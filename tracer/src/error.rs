//! Error types for the tracer.
//!
//! Only configuration problems are errors. A search that cannot reach its
//! goal or is cancelled reports that through
//! [`SearchOutcome`](crate::search::SearchOutcome) instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Degenerate intensity range: min {min} and max {max} must be finite with max > min")]
    DegenerateRange { min: f64, max: f64 },

    #[error("Invalid {name} for {model} cost: {value}")]
    InvalidParameter {
        model: &'static str,
        name: &'static str,
        value: f64,
    },

    #[error("Invalid calibration ({width}, {height}, {depth}): spacings must be finite and positive")]
    InvalidCalibration { width: f64, height: f64, depth: f64 },

    #[error("The {heuristic} heuristic requires a calibration")]
    MissingCalibration { heuristic: &'static str },

    #[error(
        "Heuristic calibration ({heuristic_width}, {heuristic_height}, {heuristic_depth}) \
         differs from search calibration ({width}, {height}, {depth})"
    )]
    CalibrationMismatch {
        heuristic_width: f64,
        heuristic_height: f64,
        heuristic_depth: f64,
        width: f64,
        height: f64,
        depth: f64,
    },

    #[error("Expected occupancy must be within [0, 1], got {0}")]
    InvalidOccupancy(f64),

    #[error("Invalid dimensions {width}x{height}: both must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid volume dimensions {width}x{height}x{depth}: all must be non-zero")]
    InvalidVolumeDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },

    #[error("Volume expects {expected} samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    #[error("Volume contains no finite values")]
    EmptyVolume,

    #[error("Fill threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid fill: {0}")]
    InvalidFill(String),

    #[error("Failed to read config '{path}': {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedConfigFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_range_message() {
        let err = Error::DegenerateRange { min: 5.0, max: 5.0 };
        let msg = err.to_string();
        assert!(msg.contains("min 5"));
        assert!(msg.contains("max 5"));
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::InvalidParameter {
            model: "OneMinusErf",
            name: "standard deviation",
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid standard deviation for OneMinusErf cost: 0"
        );
    }

    #[test]
    fn test_missing_calibration_message() {
        let err = Error::MissingCalibration {
            heuristic: "Euclidean",
        };
        assert!(err.to_string().contains("Euclidean"));
    }

    #[test]
    fn test_volume_dimension_messages() {
        let err = Error::InvalidVolumeDimensions {
            width: 4,
            height: 3,
            depth: 0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid volume dimensions 4x3x0: all must be non-zero"
        );

        let err = Error::SampleCountMismatch {
            expected: 12,
            actual: 11,
        };
        assert_eq!(err.to_string(), "Volume expects 12 samples, got 11");
    }

    #[test]
    fn test_config_load_source_chain() {
        use std::error::Error as StdError;

        let err = Error::ConfigLoad {
            path: PathBuf::from("/tmp/tracer.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/tracer.yaml"));
        assert!(err.source().is_some());
    }
}
