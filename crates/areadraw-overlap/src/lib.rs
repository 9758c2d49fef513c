//! # AreaDraw Overlap
//!
//! Decides what happens to a newly drawn shape given the shapes already
//! accepted on the map:
//!
//! ```text
//! DrawnShape ──► Normalizer ──► OverlapResolver ──► OverlapOutcome
//!                                   │   ▲
//!                                   ▼   │
//!                        GeometryOps (union / difference / area)
//!                                   │
//!                                   ▼ (degenerate batch result)
//!                          iterative trim fallback
//! ```
//!
//! Lines never take part in overlap detection. A shape that fully encloses,
//! or lies fully inside, an existing shape is rejected. Partial overlaps are
//! trimmed away; a trim that leaves (almost) nothing is rejected.

pub mod error;
pub mod normalize;
pub mod ops;
pub mod resolver;
pub mod trim;

pub use error::{GeometryOpError, NormalizeError, OpResult, Rejection};
pub use normalize::{to_shape_geometry, NormalizedPolygon, Normalizer};
pub use ops::{GeoOps, GeometryOps};
pub use resolver::{resolve, OverlapOutcome, OverlapResolver};
pub use trim::trim_iteratively;
