//! GeoJSON hazard layer loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{GeoJson, PolygonType, Value};
use tracing::{info, warn};

use crate::geometry::GeometryError;
use crate::models::{FeatureCollection, HazardFeature, HazardGeometry};

/// Load a hazard layer from a GeoJSON file
pub fn load_feature_collection<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hazard layer {}", path.display()))?;
    let collection = parse_feature_collection(&content)
        .with_context(|| format!("Failed to parse hazard layer {}", path.display()))?;

    info!(
        "Loaded {} features ({} with geometry) from {}",
        collection.len(),
        collection.with_geometry(),
        path.display()
    );

    Ok(collection)
}

/// Parse a GeoJSON `FeatureCollection` into a hazard layer.
///
/// Features whose geometry is missing, non-polygonal, or malformed keep their
/// position with `geometry = None`.
pub fn parse_feature_collection(content: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = content.parse()?;

    let fc = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(_) => anyhow::bail!("Expected a FeatureCollection, found a Feature"),
        GeoJson::Geometry(_) => anyhow::bail!("Expected a FeatureCollection, found a Geometry"),
    };

    let mut features = Vec::with_capacity(fc.features.len());
    for (i, feature) in fc.features.into_iter().enumerate() {
        let geometry = match feature.geometry.as_ref().map(|g| convert_geometry(&g.value)) {
            Some(Ok(geometry)) => Some(geometry),
            Some(Err(e)) => {
                warn!("Feature {} has unusable geometry: {}", i, e);
                None
            }
            None => None,
        };

        features.push(HazardFeature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        });
    }

    Ok(FeatureCollection::new(features))
}

fn convert_geometry(value: &Value) -> Result<HazardGeometry, GeometryError> {
    match value {
        Value::Polygon(rings) => Ok(HazardGeometry::Polygon(convert_polygon(rings)?)),
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(convert_polygon)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(HazardGeometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        other => Err(GeometryError::UnsupportedGeometry(
            value_type_name(other).to_string(),
        )),
    }
}

fn convert_polygon(rings: &PolygonType) -> Result<Polygon<f64>, GeometryError> {
    let mut rings = rings.iter().map(|ring| {
        ring.iter()
            .map(|position| match position.as_slice() {
                [x, y, ..] => Ok(Coord { x: *x, y: *y }),
                short => Err(GeometryError::InvalidPosition(short.len())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(LineString::new)
    });

    let exterior = match rings.next() {
        Some(ring) => ring?,
        None => LineString::new(vec![]),
    };
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;

    Ok(Polygon::new(exterior, interiors))
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LAYER: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "PGA": "Zone 2B" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[66.0, 24.0], [68.0, 24.0], [68.0, 26.0], [66.0, 26.0], [66.0, 24.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "gauge" },
                "geometry": { "type": "Point", "coordinates": [67.0, 25.0] }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": null
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[70.0, 30.0], [71.0, 30.0], [71.0, 31.0], [70.0, 30.0]]],
                        [[[72.0, 30.0], [73.0, 30.0], [73.0, 31.0], [72.0, 30.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_keeps_feature_order() {
        let collection = parse_feature_collection(LAYER).unwrap();
        assert_eq!(collection.len(), 4);
        assert_eq!(collection.with_geometry(), 2);

        assert_eq!(collection.features[0].label("PGA"), Some("Zone 2B".to_string()));
        assert!(matches!(
            collection.features[0].geometry,
            Some(HazardGeometry::Polygon(_))
        ));
        assert!(collection.features[1].geometry.is_none());
        assert!(collection.features[2].geometry.is_none());
        assert!(collection.features[2].properties.is_empty());
        match &collection.features[3].geometry {
            Some(HazardGeometry::MultiPolygon(mp)) => assert_eq!(mp.0.len(), 2),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_short_position_rejects_polygon() {
        let rings: PolygonType = vec![vec![
            vec![1.0, 2.0],
            vec![3.0],
            vec![4.0, 5.0],
            vec![1.0, 2.0],
        ]];
        assert_eq!(
            convert_polygon(&rings),
            Err(GeometryError::InvalidPosition(1))
        );
    }

    #[test]
    fn test_unsupported_geometry_type() {
        let value = Value::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        assert_eq!(
            convert_geometry(&value),
            Err(GeometryError::UnsupportedGeometry("LineString".to_string()))
        );
    }

    #[test]
    fn test_non_collection_is_error() {
        let geometry = r#"{ "type": "Point", "coordinates": [1.0, 2.0] }"#;
        assert!(parse_feature_collection(geometry).is_err());
        assert!(parse_feature_collection("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LAYER.as_bytes()).unwrap();

        let collection = load_feature_collection(file.path()).unwrap();
        assert_eq!(collection.len(), 4);
        assert!(load_feature_collection("/nonexistent/layer.geojson").is_err());
    }
}
