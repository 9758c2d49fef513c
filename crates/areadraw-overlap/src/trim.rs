//! Iterative trim fallback.
//!
//! Used when the batched union + difference step cannot produce a usable
//! polygon. Neighbors are subtracted one at a time, in encounter order, and
//! the first invalid intermediate result rejects the shape.

use geo::MultiPolygon;
use tracing::debug;

use crate::error::{GeometryOpError, Rejection};
use crate::normalize::NormalizedPolygon;
use crate::ops::GeometryOps;

pub fn trim_iteratively<O: GeometryOps + ?Sized>(
    ops: &O,
    new_polygon: &MultiPolygon<f64>,
    neighbors: &[NormalizedPolygon],
    min_area_m2: f64,
) -> Result<MultiPolygon<f64>, Rejection> {
    let mut working = new_polygon.clone();

    for neighbor in neighbors {
        working = match ops.difference(&working, &neighbor.geometry) {
            Ok(rest) => rest,
            Err(GeometryOpError::Empty { .. }) => return Err(Rejection::FullyErased),
            Err(err) => return Err(Rejection::TrimFailed(err)),
        };
        let area = ensure_min_area(ops, &working, min_area_m2)?;
        debug!("Trimmed against {}, {:.4} m² left", neighbor.source, area);
    }

    Ok(working)
}

/// Area of `geometry`, or a rejection when it is NaN or under `min_area_m2`.
pub(crate) fn ensure_min_area<O: GeometryOps + ?Sized>(
    ops: &O,
    geometry: &MultiPolygon<f64>,
    min_area_m2: f64,
) -> Result<f64, Rejection> {
    let area = ops.area(geometry);
    if area.is_nan() || area < min_area_m2 {
        return Err(Rejection::AreaBelowThreshold { area });
    }
    Ok(area)
}
