//! Nearest flood boundary point, for display alongside the risk level.

use tracing::debug;

use super::ScanLimits;
use crate::geometry::sample_segment;
use crate::models::{FeatureCollection, GeoPoint, NearestFloodPoint};

/// Find the closest sampled point on the outer rings of the flood layer.
///
/// Only the first `limits.nearest` features are walked. When the closest
/// distance came from an endpoint fallback with no sampled position, the
/// winning feature's first coordinate stands in for the nearest point.
pub fn find_nearest_flood_point(
    point: GeoPoint,
    flood: &FeatureCollection,
    limits: &ScanLimits,
) -> NearestFloodPoint {
    let mut best_distance = f64::INFINITY;
    let mut best_point: Option<GeoPoint> = None;
    let mut best_feature: Option<usize> = None;

    for (i, feature) in flood.features.iter().take(limits.nearest).enumerate() {
        let Some(geometry) = feature.geometry.as_ref() else {
            continue;
        };

        for polygon in geometry.polygons() {
            for line in polygon.exterior().lines() {
                let hit = sample_segment(point, line.start.into(), line.end.into(), limits.segment_samples);
                if hit.distance_km < best_distance {
                    best_distance = hit.distance_km;
                    best_feature = Some(i);
                    best_point = hit.point;
                }
            }
        }
    }

    let Some(feature_index) = best_feature else {
        return NearestFloodPoint::unknown();
    };

    if best_point.is_none() {
        debug!("No sampled boundary point, using first coordinate of feature {}", feature_index);
        best_point = flood.features[feature_index]
            .geometry
            .as_ref()
            .and_then(|g| g.first_coordinate());
    }

    NearestFloodPoint {
        distance: best_distance,
        nearest_point: best_point,
        feature_index: Some(feature_index),
    }
}
