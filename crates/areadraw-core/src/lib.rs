//! # AreaDraw Core
//!
//! Core types shared by every AreaDraw crate:
//! - the drawn shape model (`DrawnShape`, `ShapeKind`, `ShapeGeometry`)
//! - error types for shape validation and configuration
//! - resolver and shape-limit configuration with file loading

pub mod config;
pub mod constants;
pub mod error;
pub mod shape;

pub use config::{Config, ResolverConfig, ShapeLimits};
pub use error::{ConfigError, ConfigResult, ShapeError, ShapeResult};
pub use shape::{DrawnShape, Position, Ring, ShapeGeometry, ShapeKind};
