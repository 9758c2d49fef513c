//! Shared fixtures and geometry-ops test doubles.

#![allow(dead_code)]

use std::cell::Cell;

use areadraw_core::DrawnShape;
use areadraw_overlap::{GeoOps, GeometryOpError, GeometryOps, Normalizer, OpResult};
use geo::MultiPolygon;

/// One test unit in degrees, roughly 111 m at the equator.
pub const UNIT: f64 = 0.001;

pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawnShape {
    DrawnShape::rectangle([x0 * UNIT, y0 * UNIT], [x1 * UNIT, y1 * UNIT]).unwrap()
}

pub fn polygon(points: &[(f64, f64)]) -> DrawnShape {
    let ring = points.iter().map(|&(x, y)| [x * UNIT, y * UNIT]).collect();
    DrawnShape::polygon(vec![ring]).unwrap()
}

pub fn circle(x: f64, y: f64, radius_m: f64) -> DrawnShape {
    DrawnShape::circle([x * UNIT, y * UNIT], radius_m).unwrap()
}

pub fn line(points: &[(f64, f64)]) -> DrawnShape {
    DrawnShape::line(points.iter().map(|&(x, y)| [x * UNIT, y * UNIT]).collect()).unwrap()
}

/// Geodesic area of a shape in square meters.
pub fn area_of(shape: &DrawnShape) -> f64 {
    let normalized = Normalizer::default().normalize(shape).unwrap().unwrap();
    GeoOps.area(&normalized.geometry)
}

/// Counts calls and delegates to `GeoOps`.
#[derive(Default)]
pub struct CountingOps {
    pub unions: Cell<usize>,
    pub differences: Cell<usize>,
}

impl GeometryOps for CountingOps {
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.intersects(a, b)
    }

    fn within(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.within(a, b)
    }

    fn union(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>> {
        self.unions.set(self.unions.get() + 1);
        GeoOps.union(a, b)
    }

    fn difference(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> OpResult<MultiPolygon<f64>> {
        self.differences.set(self.differences.get() + 1);
        GeoOps.difference(a, b)
    }

    fn area(&self, a: &MultiPolygon<f64>) -> f64 {
        GeoOps.area(a)
    }
}

/// Every union fails; everything else delegates to `GeoOps`.
#[derive(Default)]
pub struct FailingUnionOps {
    pub differences: Cell<usize>,
}

impl GeometryOps for FailingUnionOps {
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.intersects(a, b)
    }

    fn within(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.within(a, b)
    }

    fn union(&self, _a: &MultiPolygon<f64>, _b: &MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>> {
        Err(GeometryOpError::Panicked {
            op: "union",
            message: "forced failure".to_string(),
        })
    }

    fn difference(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> OpResult<MultiPolygon<f64>> {
        self.differences.set(self.differences.get() + 1);
        GeoOps.difference(a, b)
    }

    fn area(&self, a: &MultiPolygon<f64>) -> f64 {
        GeoOps.area(a)
    }
}

/// The first `fail_first` differences fail with non-finite output.
pub struct FailingDifferenceOps {
    pub fail_first: usize,
    pub differences: Cell<usize>,
}

impl FailingDifferenceOps {
    pub fn new(fail_first: usize) -> Self {
        Self {
            fail_first,
            differences: Cell::new(0),
        }
    }
}

impl GeometryOps for FailingDifferenceOps {
    fn intersects(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.intersects(a, b)
    }

    fn within(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> bool {
        GeoOps.within(a, b)
    }

    fn union(&self, a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> OpResult<MultiPolygon<f64>> {
        GeoOps.union(a, b)
    }

    fn difference(
        &self,
        a: &MultiPolygon<f64>,
        b: &MultiPolygon<f64>,
    ) -> OpResult<MultiPolygon<f64>> {
        let call = self.differences.get() + 1;
        self.differences.set(call);
        if call <= self.fail_first {
            return Err(GeometryOpError::NonFinite { op: "difference" });
        }
        GeoOps.difference(a, b)
    }

    fn area(&self, a: &MultiPolygon<f64>) -> f64 {
        GeoOps.area(a)
    }
}
