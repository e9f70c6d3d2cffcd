//! Hazard layer types.
//!
//! A hazard layer is an ordered list of polygonal features. Feature order is
//! significant: lookups are first-match and the flood scanners only look at a
//! bounded prefix of the collection.

use geo::{MultiPolygon, Polygon};
use serde_json::{Map, Value};

use super::GeoPoint;

/// Polygonal geometry of a hazard feature
#[derive(Debug, Clone, PartialEq)]
pub enum HazardGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl HazardGeometry {
    /// Constituent polygons (one for `Polygon`)
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            HazardGeometry::Polygon(p) => std::slice::from_ref(p),
            HazardGeometry::MultiPolygon(mp) => &mp.0,
        }
    }

    /// First raw position of the geometry, if any
    pub fn first_coordinate(&self) -> Option<GeoPoint> {
        self.polygons()
            .iter()
            .flat_map(|p| p.exterior().0.first())
            .next()
            .map(|c| GeoPoint::from(*c))
    }
}

impl From<Polygon<f64>> for HazardGeometry {
    fn from(p: Polygon<f64>) -> Self {
        HazardGeometry::Polygon(p)
    }
}

impl From<MultiPolygon<f64>> for HazardGeometry {
    fn from(mp: MultiPolygon<f64>) -> Self {
        HazardGeometry::MultiPolygon(mp)
    }
}

/// A single feature of a hazard layer.
///
/// `geometry` is `None` when the source geometry was missing, malformed, or of
/// a non-polygonal type. Such features keep their slot in the collection.
#[derive(Debug, Clone, Default)]
pub struct HazardFeature {
    pub geometry: Option<HazardGeometry>,
    pub properties: Map<String, Value>,
}

impl HazardFeature {
    pub fn new(geometry: impl Into<HazardGeometry>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Property as a label.
    ///
    /// Numbers are rendered as strings; empty strings and other JSON types
    /// count as missing.
    pub fn label(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Ordered hazard layer
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<HazardFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<HazardFeature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of features that carry a usable geometry
    pub fn with_geometry(&self) -> usize {
        self.features
            .iter()
            .filter(|f| f.geometry.is_some())
            .count()
    }
}
