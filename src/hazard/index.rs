//! Spatial index for fast seismic zone lookups.

use geo::BoundingRect;
use rstar::{RTree, RTreeObject, AABB};
use tracing::info;

use super::earthquake::matching_label;
use crate::geometry::validate_polygon;
use crate::models::{EarthquakeZoneResult, FeatureCollection, GeoPoint, HazardFeature};

/// Envelope of one valid polygon, tagged with its feature's position
#[derive(Debug, Clone)]
struct IndexedPolygon {
    ordinal: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedPolygon {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Seismic zone layer with an R-tree over polygon envelopes.
///
/// Lookups return the same zone as [`super::find_earthquake_zone`]: among the
/// candidates whose envelope covers the point, the lowest collection position
/// that contains it wins.
pub struct EarthquakeZoneIndex {
    zones: FeatureCollection,
    label_property: String,
    tree: RTree<IndexedPolygon>,
}

impl EarthquakeZoneIndex {
    /// Build the index over every labelled feature with a valid polygon
    pub fn build(zones: FeatureCollection, label_property: &str) -> Self {
        let indexed: Vec<IndexedPolygon> = zones
            .features
            .iter()
            .enumerate()
            .filter(|(_, f)| f.label(label_property).is_some())
            .flat_map(|(ordinal, f)| polygon_envelopes(f).map(move |envelope| IndexedPolygon { ordinal, envelope }))
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!(
            "Seismic zone index built with {} polygons from {} features",
            tree.size(),
            zones.len()
        );

        Self {
            zones,
            label_property: label_property.to_string(),
            tree,
        }
    }

    /// Find the seismic zone containing a point
    pub fn find(&self, point: GeoPoint) -> Option<EarthquakeZoneResult> {
        let query = AABB::from_point([point.lng, point.lat]);

        let mut candidates: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|ip| ip.ordinal)
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .find_map(|i| matching_label(point, &self.zones.features[i], &self.label_property))
            .map(EarthquakeZoneResult::from_label)
    }

    /// Number of indexed polygons
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

fn polygon_envelopes(feature: &HazardFeature) -> impl Iterator<Item = AABB<[f64; 2]>> + '_ {
    feature
        .geometry
        .iter()
        .flat_map(|g| g.polygons())
        .filter(|p| validate_polygon(p).is_ok())
        .filter_map(|p| p.bounding_rect())
        .map(|rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}
