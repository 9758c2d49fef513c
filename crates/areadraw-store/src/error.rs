//! Error types for the store crate.

use std::io;
use thiserror::Error;

use areadraw_core::{ShapeError, ShapeKind};
use areadraw_overlap::Rejection;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The per-kind shape limit has been reached.
    #[error("Maximum {limit} {kind}s allowed")]
    LimitReached { kind: ShapeKind, limit: usize },

    /// The overlap resolver rejected the shape.
    #[error("Shape overlaps existing shape: {0}")]
    Rejected(#[from] Rejection),

    /// The shape failed validation.
    #[error("Invalid shape: {0}")]
    Shape(#[from] ShapeError),

    /// A GeoJSON feature could not be turned into a shape.
    #[error("Invalid feature #{index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
