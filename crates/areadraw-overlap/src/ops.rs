//! Boolean geometry primitives.
//!
//! `GeometryOps` is the seam between the resolver and the geometry library.
//! `GeoOps` implements it with the `geo` crate: topological predicates from
//! the DE-9IM matrix of `Relate`, booleans via `BooleanOps`, and geodesic
//! area in square meters.

use std::panic::{self, AssertUnwindSafe};

use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::relate::IntersectionMatrix;
use geo::{BooleanOps, ChamberlainDuquetteArea, CoordsIter, MultiPolygon, Relate};

use crate::error::{GeometryOpError, OpResult};

pub trait GeometryOps {
    /// `a` and `b` share interior area. Touching boundaries do not count.
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool;

    /// `a` lies entirely inside `b`.
    fn within(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool;

    fn union(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>>;

    /// `a` minus `b`.
    fn difference(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> OpResult<MultiPolygon<f64>>;

    /// Unsigned area in square meters.
    fn area(&self, a: &MultiPolygon<f64>) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GeoOps;

impl GeometryOps for GeoOps {
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        // An unknown relation is treated as an overlap so the trim path decides.
        guarded("intersects", || interiors_meet(&a.relate(b))).unwrap_or(true)
    }

    fn within(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        guarded("within", || {
            let matrix = a.relate(b);
            interiors_meet(&matrix)
                && matrix.get(CoordPos::Inside, CoordPos::Outside) == Dimensions::Empty
                && matrix.get(CoordPos::OnBoundary, CoordPos::Outside) == Dimensions::Empty
        })
        .unwrap_or(false)
    }

    fn union(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>> {
        guarded("union", || a.union(b)).and_then(|result| checked("union", result))
    }

    fn difference(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> OpResult<MultiPolygon<f64>> {
        guarded("difference", || a.difference(b)).and_then(|result| checked("difference", result))
    }

    fn area(&self, a: &MultiPolygon<f64>) -> f64 {
        a.chamberlain_duquette_unsigned_area()
    }
}

fn interiors_meet(matrix: &IntersectionMatrix) -> bool {
    matrix.get(CoordPos::Inside, CoordPos::Inside) != Dimensions::Empty
}

/// Runs a geometry computation, turning a panic inside the library into an
/// error value.
fn guarded<T>(op: &'static str, f: impl FnOnce() -> T) -> OpResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::warn!("Geometry operation {} panicked: {}", op, message);
        GeometryOpError::Panicked { op, message }
    })
}

fn checked(op: &'static str, result: MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>> {
    if result.0.is_empty() {
        return Err(GeometryOpError::Empty { op });
    }
    if result
        .coords_iter()
        .any(|c| !(c.x.is_finite() && c.y.is_finite()))
    {
        return Err(GeometryOpError::NonFinite { op });
    }
    Ok(result)
}
