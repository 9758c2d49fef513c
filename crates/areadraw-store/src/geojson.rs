//! GeoJSON import and export.
//!
//! Shapes are written as a `FeatureCollection`. Each feature carries its id
//! and shape type in `properties`; circles are written as a `Point` with a
//! `radius` property in meters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use areadraw_core::{DrawnShape, Position, Ring, ShapeGeometry, ShapeKind};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeKind>,
    /// Circle radius in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub feature_type: FeatureType,
    pub geometry: GeoJsonGeometry,
    #[serde(default)]
    pub properties: Option<FeatureProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub collection_type: CollectionType,
    pub features: Vec<Feature>,
}

impl From<&DrawnShape> for Feature {
    fn from(shape: &DrawnShape) -> Self {
        let mut properties = FeatureProperties {
            id: Some(shape.id),
            shape_type: Some(shape.kind),
            radius: None,
        };

        let geometry = match &shape.geometry {
            ShapeGeometry::Circle { center, radius } => {
                properties.radius = Some(*radius);
                GeoJsonGeometry::Point {
                    coordinates: *center,
                }
            }
            ShapeGeometry::Line(points) => GeoJsonGeometry::LineString {
                coordinates: points.clone(),
            },
            ShapeGeometry::Polygon(rings) => GeoJsonGeometry::Polygon {
                coordinates: rings.clone(),
            },
            ShapeGeometry::MultiPolygon(polygons) => GeoJsonGeometry::MultiPolygon {
                coordinates: polygons.clone(),
            },
        };

        Self {
            feature_type: FeatureType::Feature,
            geometry,
            properties: Some(properties),
        }
    }
}

impl Feature {
    /// Converts the feature back into a shape. `index` is the feature's
    /// position in its collection, used for error reporting.
    ///
    /// A missing id is replaced by a fresh one. A missing shape type is
    /// inferred from the geometry type.
    pub fn to_shape(&self, index: usize) -> StoreResult<DrawnShape> {
        let properties = self.properties.clone().unwrap_or_default();
        let invalid = |reason: String| StoreError::InvalidFeature { index, reason };

        let geometry = match &self.geometry {
            GeoJsonGeometry::Point { coordinates } => match properties.radius {
                Some(radius) => ShapeGeometry::Circle {
                    center: *coordinates,
                    radius,
                },
                None => return Err(invalid("Point feature without a radius".to_string())),
            },
            GeoJsonGeometry::LineString { coordinates } => ShapeGeometry::Line(coordinates.clone()),
            GeoJsonGeometry::Polygon { coordinates } => ShapeGeometry::Polygon(coordinates.clone()),
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                ShapeGeometry::MultiPolygon(coordinates.clone())
            }
        };

        let kind = properties.shape_type.unwrap_or(match geometry {
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
            ShapeGeometry::Line(_) => ShapeKind::Line,
            ShapeGeometry::Polygon(_) | ShapeGeometry::MultiPolygon(_) => ShapeKind::Polygon,
        });
        let id = properties.id.unwrap_or_else(Uuid::new_v4);

        DrawnShape::from_parts(id, kind, geometry).map_err(|err| invalid(err.to_string()))
    }
}

impl FeatureCollection {
    pub fn from_shapes<'a>(shapes: impl IntoIterator<Item = &'a DrawnShape>) -> Self {
        Self {
            collection_type: CollectionType::FeatureCollection,
            features: shapes.into_iter().map(Feature::from).collect(),
        }
    }

    /// Shapes in feature order. The first invalid feature fails the whole
    /// collection.
    pub fn to_shapes(&self) -> StoreResult<Vec<DrawnShape>> {
        self.features
            .iter()
            .enumerate()
            .map(|(index, feature)| feature.to_shape(index))
            .collect()
    }

    pub fn to_json_pretty(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

pub fn write_geojson<'a>(
    path: &Path,
    shapes: impl IntoIterator<Item = &'a DrawnShape>,
) -> StoreResult<()> {
    let content = FeatureCollection::from_shapes(shapes).to_json_pretty()?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn read_geojson(path: &Path) -> StoreResult<Vec<DrawnShape>> {
    let content = std::fs::read_to_string(path)?;
    let collection = FeatureCollection::from_json(&content)?;
    tracing::debug!(
        "Read {} feature(s) from {}",
        collection.features.len(),
        path.display()
    );
    collection.to_shapes()
}
