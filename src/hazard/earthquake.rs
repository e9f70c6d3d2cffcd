//! Seismic zone matching.

use tracing::debug;

use crate::geometry::point_in_polygon;
use crate::models::{EarthquakeZoneResult, FeatureCollection, GeoPoint, HazardFeature};

/// Property carrying the PGA zone label
pub const DEFAULT_ZONE_PROPERTY: &str = "PGA";

/// Label of a feature if it is a usable zone containing `point`
pub(super) fn matching_label(
    point: GeoPoint,
    feature: &HazardFeature,
    label_property: &str,
) -> Option<String> {
    let geometry = feature.geometry.as_ref()?;
    let label = feature.label(label_property)?;
    point_in_polygon(point, geometry).then_some(label)
}

/// Find the seismic zone containing a point.
///
/// Zones are assumed not to overlap; the first containing feature in
/// collection order wins. Features without geometry or label are skipped.
pub fn find_earthquake_zone(
    point: GeoPoint,
    zones: &FeatureCollection,
    label_property: &str,
) -> Option<EarthquakeZoneResult> {
    let (index, label) = zones
        .features
        .iter()
        .enumerate()
        .find_map(|(i, f)| matching_label(point, f, label_property).map(|l| (i, l)))?;

    debug!("Point {} in seismic zone '{}' (feature {})", point, label, index);
    Some(EarthquakeZoneResult::from_label(label))
}
