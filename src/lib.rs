//! # AreaDraw
//!
//! Collision-free drawing of areal shapes on a map:
//! - polygons, rectangles, circles and lines with per-kind limits
//! - overlap detection against every stored shape
//! - containment rejection and trimming of partial overlaps
//! - GeoJSON FeatureCollection export and replay
//!
//! ## Architecture
//!
//! AreaDraw is organized as a workspace with multiple crates:
//!
//! 1. **areadraw-core** - Shape model, errors, configuration
//! 2. **areadraw-overlap** - Normalization, boolean ops, overlap resolution
//! 3. **areadraw-store** - Feature store, shape limits, GeoJSON
//! 4. **areadraw** - CLI that replays drawings through the store

pub mod cli;

pub use areadraw_core::{
    Config, ConfigError, DrawnShape, Position, ResolverConfig, Ring, ShapeError, ShapeGeometry,
    ShapeKind, ShapeLimits,
};
pub use areadraw_overlap::{
    resolve, GeoOps, GeometryOps, Normalizer, OverlapOutcome, OverlapResolver, Rejection,
};
pub use areadraw_store::{FeatureCollection, FeatureStore, Placement, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter from `RUST_LOG`-style directives, INFO when none are given.
pub fn log_filter(directives: &str) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;

    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - stderr output, leaving stdout to command results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = log_filter(&std::env::var("RUST_LOG").unwrap_or_default());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
