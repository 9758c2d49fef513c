//! Error and rejection types for overlap resolution.
//!
//! None of these escape as failures: normalization and geometry errors are
//! folded into an `OverlapOutcome`, and `Rejection` is the reason attached
//! to a rejected outcome.

use thiserror::Error;
use uuid::Uuid;

/// A shape that cannot be turned into polygon geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Circle radius must be a positive number, got {0}")]
    InvalidRadius(f64),

    #[error("Polygon has no rings")]
    EmptyPolygon,
}

/// Failure of a boolean geometry primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryOpError {
    /// The underlying algorithm panicked on degenerate input.
    #[error("{op} failed: {message}")]
    Panicked { op: &'static str, message: String },

    /// The operation produced no polygon.
    #[error("{op} produced no geometry")]
    Empty { op: &'static str },

    /// The operation produced NaN or infinite coordinates.
    #[error("{op} produced non-finite coordinates")]
    NonFinite { op: &'static str },
}

pub type OpResult<T> = Result<T, GeometryOpError>;

/// Why a drawn shape was not accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("Shape cannot be checked for overlap: {0}")]
    InvalidInput(#[from] NormalizeError),

    #[error("Shape lies entirely inside existing shape {existing}")]
    InsideExisting { existing: Uuid },

    #[error("Shape fully encloses existing shape {existing}")]
    EnclosesExisting { existing: Uuid },

    #[error("Trimmed area {area} m² is below the minimum")]
    AreaBelowThreshold { area: f64 },

    #[error("Shape completely removed by overlapping shapes")]
    FullyErased,

    #[error("Trimming failed: {0}")]
    TrimFailed(GeometryOpError),
}
