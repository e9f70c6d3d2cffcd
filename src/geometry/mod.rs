//! Geometry primitives for hazard lookups.
//!
//! Containment goes through `geo`; distances are great-circle kilometers.

mod contains;
mod distance;

use thiserror::Error;

pub use contains::{point_in_polygon, polygon_contains, validate_polygon};
pub use distance::{
    boundary_distance_km, haversine_distance_km, nearest_vertex_distance_km,
    point_to_segment_distance_km, sample_segment, SegmentHit, EARTH_RADIUS_KM, SEGMENT_SAMPLES,
};

/// Per-polygon or per-feature geometry problem.
///
/// Scanners skip the offending item and keep going; these never escape a
/// hazard lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("ring has {0} positions, too few to form a boundary")]
    DegenerateRing(usize),
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("position has {0} values, expected at least 2")]
    InvalidPosition(usize),
    #[error("unsupported geometry type {0}")]
    UnsupportedGeometry(String),
    #[error("geometry has no usable vertices")]
    NoVertices,
}
