//! Overlap resolution.
//!
//! `OverlapResolver::resolve` is a pure function of the new shape and a
//! snapshot of the existing shapes, scanned in insertion order:
//!
//! 1. lines are accepted untouched;
//! 2. existing shapes that are disjoint (or not polygonal) are ignored;
//! 3. the first full containment in either direction rejects the shape;
//! 4. partially overlapping shapes are collected as neighbors;
//! 5. the union of all neighbors is subtracted from the new shape in one
//!    step, falling back to iterative trimming when that step degenerates.

use geo::MultiPolygon;
use tracing::{debug, info, warn};

use areadraw_core::{DrawnShape, ResolverConfig};

use crate::error::{GeometryOpError, Rejection};
use crate::normalize::{to_shape_geometry, NormalizedPolygon, Normalizer};
use crate::ops::{GeoOps, GeometryOps};
use crate::trim::{ensure_min_area, trim_iteratively};

#[derive(Debug, Clone, PartialEq)]
pub enum OverlapOutcome {
    /// The input shape, unchanged.
    Accepted(DrawnShape),
    /// The input shape with overlapping area removed. Same id; a circle is
    /// reclassified as a polygon.
    Trimmed(DrawnShape),
    Rejected(Rejection),
}

impl OverlapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_trimmed(&self) -> bool {
        matches!(self, Self::Trimmed(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn shape(&self) -> Option<&DrawnShape> {
        match self {
            Self::Accepted(shape) | Self::Trimmed(shape) => Some(shape),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

/// How an existing polygon relates to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Disjoint,
    InsideExisting,
    EnclosesExisting,
    Overlapping,
}

/// Result of the batched union + difference stage.
#[derive(Debug)]
enum BatchTrim {
    Trimmed(MultiPolygon<f64>),
    /// The batch computation itself failed; the fallback takes over.
    Degenerate(GeometryOpError),
    Rejected(Rejection),
}

pub struct OverlapResolver<O: GeometryOps = GeoOps> {
    ops: O,
    normalizer: Normalizer,
    min_area_m2: f64,
}

impl Default for OverlapResolver<GeoOps> {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl OverlapResolver<GeoOps> {
    pub fn new(config: &ResolverConfig) -> Self {
        Self::with_ops(config, GeoOps)
    }
}

impl<O: GeometryOps> OverlapResolver<O> {
    pub fn with_ops(config: &ResolverConfig, ops: O) -> Self {
        Self {
            ops,
            normalizer: Normalizer::new(config),
            min_area_m2: config.min_area_m2,
        }
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn resolve(&self, new_shape: &DrawnShape, existing: &[DrawnShape]) -> OverlapOutcome {
        let new_polygon = match self.normalizer.normalize(new_shape) {
            Ok(Some(polygon)) => polygon,
            Ok(None) => {
                debug!("Shape {} is a {}, skipping overlap checks", new_shape.id, new_shape.kind);
                return OverlapOutcome::Accepted(new_shape.clone());
            }
            Err(err) => {
                warn!("Rejecting shape {}: {}", new_shape.id, err);
                return OverlapOutcome::Rejected(err.into());
            }
        };

        let neighbors = match self.collect_neighbors(&new_polygon, existing) {
            Ok(neighbors) => neighbors,
            Err(reason) => {
                warn!("Rejecting shape {}: {}", new_shape.id, reason);
                return OverlapOutcome::Rejected(reason);
            }
        };

        if neighbors.is_empty() {
            info!("Shape {} ({}) has no overlaps, accepted", new_shape.id, new_shape.kind);
            return OverlapOutcome::Accepted(new_shape.clone());
        }

        let trimmed = match self.trim_batch(&new_polygon, &neighbors) {
            BatchTrim::Trimmed(geometry) => geometry,
            BatchTrim::Rejected(reason) => {
                warn!("Rejecting shape {}: {}", new_shape.id, reason);
                return OverlapOutcome::Rejected(reason);
            }
            BatchTrim::Degenerate(err) => {
                warn!("{}, falling back to iterative trimming", err);
                match trim_iteratively(
                    &self.ops,
                    &new_polygon.geometry,
                    &neighbors,
                    self.min_area_m2,
                ) {
                    Ok(geometry) => geometry,
                    Err(reason) => {
                        warn!("Rejecting shape {}: {}", new_shape.id, reason);
                        return OverlapOutcome::Rejected(reason);
                    }
                }
            }
        };

        let original_area = self.ops.area(&new_polygon.geometry);
        let trimmed_area = self.ops.area(&trimmed);
        info!(
            "Trimmed shape {} against {} neighbor(s): {:.2} m² -> {:.2} m²",
            new_shape.id,
            neighbors.len(),
            original_area,
            trimmed_area
        );

        OverlapOutcome::Trimmed(new_shape.trimmed(to_shape_geometry(&trimmed)))
    }

    /// Partially overlapping existing polygons in encounter order. The first
    /// full containment ends the scan.
    fn collect_neighbors(
        &self,
        new_polygon: &NormalizedPolygon,
        existing: &[DrawnShape],
    ) -> Result<Vec<NormalizedPolygon>, Rejection> {
        let mut neighbors = Vec::new();

        for shape in existing {
            let candidate = match self.normalizer.normalize(shape) {
                Ok(Some(polygon)) => polygon,
                Ok(None) => continue,
                Err(err) => {
                    warn!("Ignoring existing shape {}: {}", shape.id, err);
                    continue;
                }
            };

            let relation = self.classify(&new_polygon.geometry, &candidate.geometry);
            debug!("Existing shape {} relation: {:?}", shape.id, relation);
            match relation {
                Relation::Disjoint => {}
                Relation::InsideExisting => {
                    return Err(Rejection::InsideExisting { existing: shape.id })
                }
                Relation::EnclosesExisting => {
                    return Err(Rejection::EnclosesExisting { existing: shape.id })
                }
                Relation::Overlapping => neighbors.push(candidate),
            }
        }

        Ok(neighbors)
    }

    fn classify(&self, new: &MultiPolygon<f64>, existing: &MultiPolygon<f64>) -> Relation {
        if !self.ops.intersects(new, existing) {
            Relation::Disjoint
        } else if self.ops.within(new, existing) {
            Relation::InsideExisting
        } else if self.ops.within(existing, new) {
            Relation::EnclosesExisting
        } else {
            Relation::Overlapping
        }
    }

    fn trim_batch(&self, new_polygon: &NormalizedPolygon, neighbors: &[NormalizedPolygon]) -> BatchTrim {
        let Some((first, rest)) = neighbors.split_first() else {
            return BatchTrim::Degenerate(GeometryOpError::Empty { op: "union" });
        };

        let mut merged = first.geometry.clone();
        for neighbor in rest {
            merged = match self.ops.union(&merged, &neighbor.geometry) {
                Ok(geometry) => geometry,
                Err(err) => return BatchTrim::Degenerate(err),
            };
        }

        let difference = match self.ops.difference(&new_polygon.geometry, &merged) {
            Ok(geometry) => geometry,
            Err(err) => return BatchTrim::Degenerate(err),
        };

        match ensure_min_area(&self.ops, &difference, self.min_area_m2) {
            Ok(_) => BatchTrim::Trimmed(difference),
            Err(reason) => BatchTrim::Rejected(reason),
        }
    }
}

/// Resolves `new_shape` against `existing` with the default configuration.
pub fn resolve(new_shape: &DrawnShape, existing: &[DrawnShape]) -> OverlapOutcome {
    OverlapResolver::<GeoOps>::default().resolve(new_shape, existing)
}
