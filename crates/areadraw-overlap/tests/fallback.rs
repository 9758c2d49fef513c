//! Iterative trim fallback

mod common;

use areadraw_core::ResolverConfig;
use areadraw_overlap::{
    resolve, trim_iteratively, GeoOps, GeometryOpError, GeometryOps, Normalizer, OverlapOutcome,
    OverlapResolver, Rejection,
};
use common::*;

#[test]
fn test_union_failure_falls_back_to_iterative_trim() {
    let neighbors = vec![rect(-5.0, -5.0, 3.0, 3.0), rect(7.0, 7.0, 15.0, 15.0)];
    let new_shape = rect(0.0, 0.0, 10.0, 10.0);

    let resolver = OverlapResolver::with_ops(&ResolverConfig::default(), FailingUnionOps::default());
    let fallback = resolver.resolve(&new_shape, &neighbors);
    let batch = resolve(&new_shape, &neighbors);

    // The batch path never reaches its difference; the fallback subtracts
    // each neighbor once.
    assert_eq!(resolver.ops().differences.get(), 2);

    let fallback_shape = match fallback {
        OverlapOutcome::Trimmed(shape) => shape,
        other => panic!("expected trimmed, got {:?}", other),
    };
    assert_eq!(fallback_shape.id, new_shape.id);
    assert_eq!(fallback_shape.kind, new_shape.kind);

    let batch_area = area_of(batch.shape().unwrap());
    let fallback_area = area_of(&fallback_shape);
    // Sequential and batched differences agree up to floating point noise.
    assert!(fallback_area <= batch_area + 1e-6 * area_of(&new_shape));
    assert!((fallback_area - batch_area).abs() / batch_area < 1e-6);
    assert!(fallback_area < area_of(&new_shape));
}

#[test]
fn test_difference_failure_falls_back_to_iterative_trim() {
    let neighbors = vec![rect(5.0, -5.0, 15.0, 15.0)];
    let new_shape = rect(0.0, 0.0, 10.0, 10.0);

    let resolver =
        OverlapResolver::with_ops(&ResolverConfig::default(), FailingDifferenceOps::new(1));
    let outcome = resolver.resolve(&new_shape, &neighbors);

    assert!(outcome.is_trimmed(), "got {:?}", outcome);
    // One failed batch difference plus one per neighbor in the fallback.
    assert_eq!(resolver.ops().differences.get(), 2);

    let ratio = area_of(outcome.shape().unwrap()) / area_of(&new_shape);
    assert!((ratio - 0.5).abs() < 0.01, "ratio {}", ratio);
}

#[test]
fn test_fully_covered_shape_is_rejected_by_both_paths() {
    // Neither half contains the new rectangle, but together they cover it.
    let neighbors = vec![rect(0.0, -10.0, 20.0, 20.0), rect(20.0, -10.0, 40.0, 20.0)];
    let new_shape = rect(10.0, 0.0, 30.0, 10.0);

    let batch = resolve(&new_shape, &neighbors);
    assert!(batch.is_rejected(), "batch got {:?}", batch);

    let resolver = OverlapResolver::with_ops(&ResolverConfig::default(), FailingUnionOps::default());
    let fallback = resolver.resolve(&new_shape, &neighbors);
    assert!(fallback.is_rejected(), "fallback got {:?}", fallback);
}

#[test]
fn test_fallback_stops_at_first_failing_neighbor() {
    let neighbors = vec![
        rect(-5.0, -5.0, 3.0, 3.0),
        rect(7.0, 7.0, 15.0, 15.0),
        rect(-5.0, 7.0, 3.0, 15.0),
    ];
    let new_shape = rect(0.0, 0.0, 10.0, 10.0);

    let resolver =
        OverlapResolver::with_ops(&ResolverConfig::default(), FailingDifferenceOps::new(2));
    let outcome = resolver.resolve(&new_shape, &neighbors);

    assert_eq!(
        outcome,
        OverlapOutcome::Rejected(Rejection::TrimFailed(GeometryOpError::NonFinite {
            op: "difference"
        }))
    );
    assert_eq!(resolver.ops().differences.get(), 2);
}

#[test]
fn test_trim_iteratively_applies_neighbors_in_order() {
    let normalizer = Normalizer::default();
    let new_polygon = normalizer
        .normalize(&rect(0.0, 0.0, 10.0, 10.0))
        .unwrap()
        .unwrap();
    let neighbors: Vec<_> = [rect(-5.0, -5.0, 3.0, 3.0), rect(7.0, 7.0, 15.0, 15.0)]
        .iter()
        .map(|shape| normalizer.normalize(shape).unwrap().unwrap())
        .collect();

    let trimmed = trim_iteratively(&GeoOps, &new_polygon.geometry, &neighbors, 1e-4).unwrap();

    // Two 3 x 3 corners removed from a 10 x 10 square.
    let ratio = GeoOps.area(&trimmed) / GeoOps.area(&new_polygon.geometry);
    assert!((ratio - 0.82).abs() < 0.001, "ratio {}", ratio);
}

#[test]
fn test_trim_iteratively_rejects_small_remainder() {
    let normalizer = Normalizer::default();
    let new_polygon = normalizer
        .normalize(&rect(0.0, 0.0, 10.0, 10.0))
        .unwrap()
        .unwrap();
    let neighbors = vec![normalizer
        .normalize(&rect(5.0, -5.0, 15.0, 15.0))
        .unwrap()
        .unwrap()];

    let result = trim_iteratively(&GeoOps, &new_polygon.geometry, &neighbors, 1e12);
    assert!(matches!(result, Err(Rejection::AreaBelowThreshold { .. })));

    let result = trim_iteratively(&GeoOps, &new_polygon.geometry, &[], 1e-4);
    assert_eq!(result, Ok(new_polygon.geometry.clone()));
}
