//! Error types for the core crate.
//!
//! Shape validation errors are raised by the `DrawnShape` constructors;
//! configuration errors cover loading, saving and validating `Config`.

use std::io;
use thiserror::Error;

use crate::shape::ShapeKind;

/// Errors raised while building or validating a drawn shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A coordinate is NaN or infinite.
    #[error("Non-finite coordinate: [{0}, {1}]")]
    NonFiniteCoordinate(f64, f64),

    /// A polygon ring has fewer than three distinct positions.
    #[error("Polygon ring needs at least 3 positions, got {0}")]
    TooFewRingPositions(usize),

    /// A line has fewer than two positions.
    #[error("Line needs at least 2 positions, got {0}")]
    TooFewLinePositions(usize),

    /// A polygon or multi-polygon without any ring.
    #[error("Polygon has no rings")]
    NoRings,

    /// Circle radius is zero, negative or not a number.
    #[error("Circle radius must be a positive number of meters, got {0}")]
    InvalidRadius(f64),

    /// Rectangle corners share an x or y coordinate.
    #[error("Rectangle corners must differ in both axes")]
    DegenerateRectangle,

    /// The geometry variant does not fit the declared shape kind.
    #[error("Shape kind '{kind}' cannot carry {geometry} geometry")]
    KindMismatch {
        kind: ShapeKind,
        geometry: &'static str,
    },
}

/// Errors related to configuration files and values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading or writing a config file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Unsupported config file extension.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

/// Result type alias for shape construction.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_display() {
        let err = ShapeError::InvalidRadius(0.0);
        assert_eq!(
            err.to_string(),
            "Circle radius must be a positive number of meters, got 0"
        );

        let err = ShapeError::KindMismatch {
            kind: ShapeKind::Line,
            geometry: "Polygon",
        };
        assert_eq!(
            err.to_string(),
            "Shape kind 'line' cannot carry Polygon geometry"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: ConfigError = io_err.into();
        assert!(matches!(err, ConfigError::Io(_)));

        let err = ConfigError::Invalid {
            key: "resolver.circle_steps".to_string(),
            reason: "must be at least 8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'resolver.circle_steps': must be at least 8"
        );
    }
}
