//! Geometry normalization.
//!
//! Converts drawn shapes into `geo` multi-polygons for boolean operations.
//! Circles are approximated by a regular polygon of haversine destination
//! points; polygons and rectangles keep their own rings; lines have no
//! polygon form.

use geo::{Coord, Destination, Haversine, LineString, MultiPolygon, Point, Polygon};
use uuid::Uuid;

use areadraw_core::constants::MIN_CIRCLE_STEPS;
use areadraw_core::{DrawnShape, Position, ResolverConfig, Ring, ShapeGeometry};

use crate::error::NormalizeError;

/// Polygon form of a drawn shape, valid for one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPolygon {
    pub source: Uuid,
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    circle_steps: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            circle_steps: config.circle_steps.max(MIN_CIRCLE_STEPS),
        }
    }

    pub fn circle_steps(&self) -> usize {
        self.circle_steps
    }

    /// Returns `Ok(None)` for lines, which never take part in overlap checks.
    pub fn normalize(&self, shape: &DrawnShape) -> Result<Option<NormalizedPolygon>, NormalizeError> {
        let geometry = match &shape.geometry {
            ShapeGeometry::Line(_) => return Ok(None),
            ShapeGeometry::Circle { center, radius } => {
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(NormalizeError::InvalidRadius(*radius));
                }
                let ring = circle_ring(*center, *radius, self.circle_steps);
                MultiPolygon::new(vec![Polygon::new(ring, vec![])])
            }
            ShapeGeometry::Polygon(rings) => MultiPolygon::new(vec![rings_to_polygon(rings)?]),
            ShapeGeometry::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return Err(NormalizeError::EmptyPolygon);
                }
                MultiPolygon::new(
                    polygons
                        .iter()
                        .map(|rings| rings_to_polygon(rings))
                        .collect::<Result<_, _>>()?,
                )
            }
        };

        Ok(Some(NormalizedPolygon {
            source: shape.id,
            geometry,
        }))
    }
}

/// Closed ring of `steps` points at `radius` meters around `center`,
/// walking counter-clockwise from north.
pub fn circle_ring(center: Position, radius: f64, steps: usize) -> LineString<f64> {
    let origin = Point::new(center[0], center[1]);
    let mut coords: Vec<Coord<f64>> = (0..steps)
        .map(|i| {
            let bearing = (i as f64) * -360.0 / (steps as f64);
            Haversine::destination(origin, bearing, radius).0
        })
        .collect();
    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    LineString::new(coords)
}

fn rings_to_polygon(rings: &[Ring]) -> Result<Polygon<f64>, NormalizeError> {
    let mut rings = rings.iter().map(|ring| LineString::from(ring.clone()));
    let exterior = rings.next().ok_or(NormalizeError::EmptyPolygon)?;
    Ok(Polygon::new(exterior, rings.collect()))
}

fn ring_positions(ring: &LineString<f64>) -> Ring {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Converts a boolean-operation result back into shape geometry. A single
/// polygon stays a `Polygon`; anything else becomes a `MultiPolygon`.
pub fn to_shape_geometry(geometry: &MultiPolygon<f64>) -> ShapeGeometry {
    let mut polygons: Vec<Vec<Ring>> = geometry
        .iter()
        .map(|polygon| {
            std::iter::once(polygon.exterior())
                .chain(polygon.interiors())
                .map(ring_positions)
                .collect()
        })
        .collect();

    if polygons.len() == 1 {
        ShapeGeometry::Polygon(polygons.remove(0))
    } else {
        ShapeGeometry::MultiPolygon(polygons)
    }
}
