//! Append-only feature store.

use std::path::Path;

use tracing::{debug, info, warn};
use uuid::Uuid;

use areadraw_core::{Config, DrawnShape, ShapeKind, ShapeLimits};
use areadraw_overlap::{GeoOps, GeometryOps, OverlapOutcome, OverlapResolver};

use crate::error::{StoreError, StoreResult};
use crate::geojson::{read_geojson, write_geojson, FeatureCollection};

/// How an accepted shape entered the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Stored as submitted.
    Accepted,
    /// Stored with overlapping area removed.
    Trimmed,
}

/// Ordered collection of accepted shapes.
///
/// Shapes are only ever appended, and every stored areal shape was resolved
/// against everything stored before it.
pub struct FeatureStore<O: GeometryOps = GeoOps> {
    features: Vec<DrawnShape>,
    limits: ShapeLimits,
    resolver: OverlapResolver<O>,
}

impl Default for FeatureStore<GeoOps> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl FeatureStore<GeoOps> {
    pub fn new(config: &Config) -> Self {
        Self::with_resolver(config.limits.clone(), OverlapResolver::new(&config.resolver))
    }
}

impl<O: GeometryOps> FeatureStore<O> {
    pub fn with_resolver(limits: ShapeLimits, resolver: OverlapResolver<O>) -> Self {
        Self {
            features: Vec::new(),
            limits,
            resolver,
        }
    }

    /// Checks the shape limit for `shape.kind`, resolves the shape against
    /// the current contents and appends whatever survives.
    ///
    /// The stored shape keeps the submitted id. A trimmed circle is stored
    /// (and counted) as a polygon.
    pub fn submit(&mut self, shape: DrawnShape) -> StoreResult<Placement> {
        let current = self.count(shape.kind);
        if !self.limits.allows(shape.kind, current) {
            let limit = self.limits.limit_for(shape.kind).unwrap_or(current);
            warn!("Shape limit reached for {}: {}/{}", shape.kind, current, limit);
            return Err(StoreError::LimitReached {
                kind: shape.kind,
                limit,
            });
        }

        let (stored, placement) = match self.resolver.resolve(&shape, &self.features) {
            OverlapOutcome::Accepted(stored) => (stored, Placement::Accepted),
            OverlapOutcome::Trimmed(stored) => (stored, Placement::Trimmed),
            OverlapOutcome::Rejected(reason) => return Err(StoreError::Rejected(reason)),
        };

        info!(
            "Saved {} {} ({:?}, {} stored)",
            stored.kind,
            stored.id,
            placement,
            self.features.len() + 1
        );
        self.features.push(stored);
        Ok(placement)
    }

    /// Number of stored shapes of `kind`, by stored kind.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.features.iter().filter(|s| s.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawnShape> {
        self.features.iter()
    }

    pub fn as_slice(&self) -> &[DrawnShape] {
        &self.features
    }

    pub fn get(&self, id: Uuid) -> Option<&DrawnShape> {
        self.features.iter().find(|s| s.id == id)
    }

    pub fn limits(&self) -> &ShapeLimits {
        &self.limits
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection::from_shapes(&self.features)
    }

    /// Writes the stored shapes as a pretty-printed GeoJSON FeatureCollection.
    pub fn export_geojson(&self, path: &Path) -> StoreResult<()> {
        write_geojson(path, &self.features)?;
        info!("Exported {} feature(s) to {}", self.features.len(), path.display());
        Ok(())
    }

    /// Reads shapes from a GeoJSON file and submits each one in file order.
    ///
    /// Returns one result per feature. A malformed file fails as a whole;
    /// individual rejections do not stop the replay.
    pub fn import_geojson(&mut self, path: &Path) -> StoreResult<Vec<StoreResult<Placement>>> {
        let shapes = read_geojson(path)?;
        debug!("Replaying {} feature(s) from {}", shapes.len(), path.display());
        Ok(shapes.into_iter().map(|shape| self.submit(shape)).collect())
    }
}

impl<'a, O: GeometryOps> IntoIterator for &'a FeatureStore<O> {
    type Item = &'a DrawnShape;
    type IntoIter = std::slice::Iter<'a, DrawnShape>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
