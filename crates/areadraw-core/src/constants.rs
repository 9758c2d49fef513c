//! Built-in defaults.

/// Trimmed results below this area (square meters) count as fully erased.
pub const DEFAULT_MIN_AREA_M2: f64 = 1e-4;

/// Number of vertices used to approximate a circle as a polygon.
pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Lower bound accepted for `ResolverConfig::circle_steps`.
pub const MIN_CIRCLE_STEPS: usize = 8;

pub const DEFAULT_POLYGON_LIMIT: usize = 10;
pub const DEFAULT_RECTANGLE_LIMIT: usize = 5;
pub const DEFAULT_CIRCLE_LIMIT: usize = 5;

/// File name used when exporting the feature collection.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "drawn-features.geojson";
