//! Flood extent classification.

use tracing::debug;

use super::ScanLimits;
use crate::geometry::{boundary_distance_km, nearest_vertex_distance_km, point_in_polygon, GeometryError};
use crate::models::{FeatureCollection, FloodRisk, GeoPoint, HazardFeature, UNKNOWN_DISTANCE_KM};

/// Margin around flood polygons treated as elevated risk
pub const DEFAULT_BUFFER_RADIUS_KM: f64 = 5.0;

/// Distance from a point to a feature's flood boundary.
///
/// Walks every ring edge; if the boundary cannot be walked, falls back to the
/// nearest ring vertex.
pub fn feature_boundary_distance_km(
    point: GeoPoint,
    feature: &HazardFeature,
    segment_samples: usize,
) -> Result<f64, GeometryError> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(GeometryError::NoVertices)?;

    boundary_distance_km(point, geometry, segment_samples).or_else(|e| {
        debug!("Boundary walk failed ({}), using nearest vertex", e);
        nearest_vertex_distance_km(point, geometry)
    })
}

/// Classify flood risk for a point.
///
/// Containment is checked against the first `limits.containment` features and
/// the first hit wins. Otherwise the first `limits.distance` features are
/// measured, stopping as soon as one lies within the buffer.
pub fn check_flood_risk(
    point: GeoPoint,
    flood: &FeatureCollection,
    buffer_radius_km: f64,
    limits: &ScanLimits,
) -> FloodRisk {
    let contained = flood
        .features
        .iter()
        .take(limits.containment)
        .position(|f| f.geometry.as_ref().is_some_and(|g| point_in_polygon(point, g)));

    if let Some(index) = contained {
        debug!("Point {} inside flood feature {}", point, index);
        return FloodRisk::classify(true, 0.0, buffer_radius_km);
    }

    let mut min_distance = f64::INFINITY;
    for (i, feature) in flood.features.iter().take(limits.distance).enumerate() {
        if feature.geometry.is_none() {
            continue;
        }
        match feature_boundary_distance_km(point, feature, limits.segment_samples) {
            Ok(d) => min_distance = min_distance.min(d),
            Err(e) => {
                debug!("Skipping flood feature {}: {}", i, e);
                continue;
            }
        }
        if min_distance <= buffer_radius_km {
            break;
        }
    }

    let distance = if min_distance.is_finite() {
        min_distance
    } else {
        UNKNOWN_DISTANCE_KM
    };

    FloodRisk::classify(false, distance, buffer_radius_km)
}
