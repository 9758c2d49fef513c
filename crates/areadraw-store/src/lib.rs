//! # AreaDraw Store
//!
//! Ordered, append-only collection of accepted shapes. Every submission goes
//! through the per-kind shape limits and the overlap resolver before it is
//! stored. The collection exports to (and imports from) a GeoJSON
//! FeatureCollection.

pub mod error;
pub mod geojson;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use geojson::{
    read_geojson, write_geojson, CollectionType, Feature, FeatureCollection, FeatureProperties,
    FeatureType, GeoJsonGeometry,
};
pub use store::{FeatureStore, Placement};
