//! Drawn shape model.
//!
//! A shape is captured once by the drawing interaction with an explicit
//! `ShapeKind` and a matching `ShapeGeometry` variant. Downstream code never
//! re-infers the kind from the geometry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ShapeError, ShapeResult};

/// `[longitude, latitude]` in degrees.
pub type Position = [f64; 2];

/// Closed sequence of positions, first position repeated at the end.
pub type Ring = Vec<Position>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Polygon,
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Polygon,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Line,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polygon => "polygon",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Line => "line",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polygon" => Ok(Self::Polygon),
            "rectangle" => Ok(Self::Rectangle),
            "circle" => Ok(Self::Circle),
            "line" => Ok(Self::Line),
            other => Err(format!("unknown shape type '{}'", other)),
        }
    }
}

/// Geometry of a drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    /// Outer ring followed by optional holes.
    Polygon(Vec<Ring>),
    /// Only produced by trimming.
    MultiPolygon(Vec<Vec<Ring>>),
    /// Radius in meters.
    Circle { center: Position, radius: f64 },
    Line(Vec<Position>),
}

impl ShapeGeometry {
    /// GeoJSON-style geometry type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::Circle { .. } => "Point",
            Self::Line(_) => "LineString",
        }
    }

    pub fn is_polygonal(&self) -> bool {
        matches!(self, Self::Polygon(_) | Self::MultiPolygon(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnShape {
    pub id: Uuid,
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
}

impl DrawnShape {
    /// Free-hand polygon. The first ring is the outer boundary; open rings are
    /// closed by repeating their first position.
    pub fn polygon(rings: Vec<Ring>) -> ShapeResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Polygon,
            geometry: ShapeGeometry::Polygon(close_rings(rings)?),
        })
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rectangle(a: Position, b: Position) -> ShapeResult<Self> {
        check_position(a)?;
        check_position(b)?;
        let (min_x, max_x) = (a[0].min(b[0]), a[0].max(b[0]));
        let (min_y, max_y) = (a[1].min(b[1]), a[1].max(b[1]));
        if min_x == max_x || min_y == max_y {
            return Err(ShapeError::DegenerateRectangle);
        }

        let ring = vec![
            [min_x, min_y],
            [max_x, min_y],
            [max_x, max_y],
            [min_x, max_y],
            [min_x, min_y],
        ];
        Ok(Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Rectangle,
            geometry: ShapeGeometry::Polygon(vec![ring]),
        })
    }

    pub fn circle(center: Position, radius: f64) -> ShapeResult<Self> {
        check_position(center)?;
        check_radius(radius)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Circle,
            geometry: ShapeGeometry::Circle { center, radius },
        })
    }

    pub fn line(points: Vec<Position>) -> ShapeResult<Self> {
        if points.len() < 2 {
            return Err(ShapeError::TooFewLinePositions(points.len()));
        }
        for p in &points {
            check_position(*p)?;
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind: ShapeKind::Line,
            geometry: ShapeGeometry::Line(points),
        })
    }

    /// Rebuilds a shape from stored parts, validating that the geometry
    /// variant fits the kind.
    pub fn from_parts(id: Uuid, kind: ShapeKind, geometry: ShapeGeometry) -> ShapeResult<Self> {
        let geometry = match (kind, geometry) {
            (ShapeKind::Circle, ShapeGeometry::Circle { center, radius }) => {
                check_position(center)?;
                check_radius(radius)?;
                ShapeGeometry::Circle { center, radius }
            }
            (ShapeKind::Line, ShapeGeometry::Line(points)) => {
                return Self::line(points).map(|s| Self { id, ..s });
            }
            (ShapeKind::Polygon | ShapeKind::Rectangle, ShapeGeometry::Polygon(rings)) => {
                ShapeGeometry::Polygon(close_rings(rings)?)
            }
            (
                ShapeKind::Polygon | ShapeKind::Rectangle,
                ShapeGeometry::MultiPolygon(polygons),
            ) => {
                if polygons.is_empty() {
                    return Err(ShapeError::NoRings);
                }
                ShapeGeometry::MultiPolygon(
                    polygons
                        .into_iter()
                        .map(close_rings)
                        .collect::<ShapeResult<_>>()?,
                )
            }
            (kind, geometry) => {
                return Err(ShapeError::KindMismatch {
                    kind,
                    geometry: geometry.type_name(),
                })
            }
        };
        Ok(Self { id, kind, geometry })
    }

    /// Copy of this shape carrying trimmed geometry. The identifier is kept;
    /// a circle whose geometry is no longer a circle becomes a polygon.
    pub fn trimmed(&self, geometry: ShapeGeometry) -> Self {
        let kind = match (self.kind, &geometry) {
            (ShapeKind::Circle, ShapeGeometry::Circle { .. }) => ShapeKind::Circle,
            (ShapeKind::Circle, _) => ShapeKind::Polygon,
            (kind, _) => kind,
        };
        Self {
            id: self.id,
            kind,
            geometry,
        }
    }
}

fn check_position(p: Position) -> ShapeResult<()> {
    if p[0].is_finite() && p[1].is_finite() {
        Ok(())
    } else {
        Err(ShapeError::NonFiniteCoordinate(p[0], p[1]))
    }
}

fn check_radius(radius: f64) -> ShapeResult<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::InvalidRadius(radius))
    }
}

fn close_rings(rings: Vec<Ring>) -> ShapeResult<Vec<Ring>> {
    if rings.is_empty() {
        return Err(ShapeError::NoRings);
    }
    rings.into_iter().map(close_ring).collect()
}

fn close_ring(mut ring: Ring) -> ShapeResult<Ring> {
    for p in &ring {
        check_position(*p)?;
    }
    let open_len = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => ring.len() - 1,
        _ => ring.len(),
    };
    if open_len < 3 {
        return Err(ShapeError::TooFewRingPositions(open_len));
    }
    if open_len == ring.len() {
        ring.push(ring[0]);
    }
    Ok(ring)
}
