//! Hazard lookups against flood and seismic layers.
//!
//! Every scanner here is total: malformed features are logged at debug level
//! and treated as non-matches, so a single bad feature never aborts a lookup.

mod earthquake;
mod flood;
mod index;
mod layer;
mod nearest;

use serde::Deserialize;

pub use earthquake::{find_earthquake_zone, DEFAULT_ZONE_PROPERTY};
pub use flood::{check_flood_risk, feature_boundary_distance_km, DEFAULT_BUFFER_RADIUS_KM};
pub use index::EarthquakeZoneIndex;
pub use layer::{load_feature_collection, parse_feature_collection};
pub use nearest::find_nearest_flood_point;

use crate::geometry::SEGMENT_SAMPLES;

/// How much of a flood layer each scanner looks at.
///
/// Flood polygons can carry very large vertex counts, so the scanners only
/// visit a prefix of the collection. A point near a later feature can be
/// reported as unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    /// Features tested for containment
    pub containment: usize,
    /// Features measured for boundary distance
    pub distance: usize,
    /// Features walked by the nearest-point finder
    pub nearest: usize,
    /// Samples per boundary segment
    pub segment_samples: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            containment: 20,
            distance: 5,
            nearest: 10,
            segment_samples: SEGMENT_SAMPLES,
        }
    }
}

impl ScanLimits {
    /// Visit every feature
    pub fn unbounded() -> Self {
        Self {
            containment: usize::MAX,
            distance: usize::MAX,
            nearest: usize::MAX,
            ..Self::default()
        }
    }
}
