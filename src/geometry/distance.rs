//! Great-circle distances to points, segments and polygon boundaries.

use geo::{Coord, LineString};

use super::GeometryError;
use crate::models::{GeoPoint, HazardGeometry};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Samples taken along each segment (endpoints included)
pub const SEGMENT_SAMPLES: usize = 15;

/// Haversine distance between two points in kilometers
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Closest sample found along a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub distance_km: f64,
    /// `None` when sampling produced nothing usable and the distance came
    /// from the endpoint fallback
    pub point: Option<GeoPoint>,
}

/// Sample `samples` evenly spaced positions along a segment and keep the
/// closest one to `point`.
///
/// Positions are interpolated linearly in lng/lat. This approximates the
/// geodesic segment distance to within half the sample spacing.
pub fn sample_segment(point: GeoPoint, start: GeoPoint, end: GeoPoint, samples: usize) -> SegmentHit {
    let samples = samples.max(2);
    let steps = (samples - 1) as f64;

    let mut best: Option<SegmentHit> = None;
    for i in 0..samples {
        let t = i as f64 / steps;
        let sample = GeoPoint::new(
            start.lat + (end.lat - start.lat) * t,
            start.lng + (end.lng - start.lng) * t,
        );
        let d = haversine_distance_km(point, sample);
        if !d.is_finite() {
            continue;
        }
        if best.map_or(true, |b| d < b.distance_km) {
            best = Some(SegmentHit {
                distance_km: d,
                point: Some(sample),
            });
        }
    }

    best.unwrap_or_else(|| SegmentHit {
        distance_km: haversine_distance_km(point, start).min(haversine_distance_km(point, end)),
        point: None,
    })
}

/// Distance from a point to a segment, in kilometers
pub fn point_to_segment_distance_km(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    sample_segment(point, start, end, SEGMENT_SAMPLES).distance_km
}

fn ring_distance_km(point: GeoPoint, ring: &LineString<f64>, samples: usize) -> Result<f64, GeometryError> {
    if ring.0.len() < 2 {
        return Err(GeometryError::DegenerateRing(ring.0.len()));
    }
    if let Some(c) = ring.0.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { x: c.x, y: c.y });
    }

    Ok(ring
        .lines()
        .map(|line| sample_segment(point, line.start.into(), line.end.into(), samples).distance_km)
        .fold(f64::INFINITY, f64::min))
}

/// Minimum distance from a point to any ring of a hazard geometry.
///
/// Holes count as boundary. Fails on the first malformed ring.
pub fn boundary_distance_km(
    point: GeoPoint,
    geometry: &HazardGeometry,
    samples: usize,
) -> Result<f64, GeometryError> {
    let mut min = f64::INFINITY;
    for polygon in geometry.polygons() {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            min = min.min(ring_distance_km(point, ring, samples)?);
        }
    }

    if min.is_finite() {
        Ok(min)
    } else {
        Err(GeometryError::NoVertices)
    }
}

/// Distance to the closest finite ring vertex.
///
/// Fallback for geometries whose boundary cannot be walked.
pub fn nearest_vertex_distance_km(point: GeoPoint, geometry: &HazardGeometry) -> Result<f64, GeometryError> {
    geometry
        .polygons()
        .iter()
        .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
        .flat_map(|ring| ring.0.iter())
        .filter(|c: &&Coord<f64>| c.x.is_finite() && c.y.is_finite())
        .map(|c| haversine_distance_km(point, GeoPoint::from(*c)))
        .filter(|d| d.is_finite())
        .min_by(|a, b| a.total_cmp(b))
        .ok_or(GeometryError::NoVertices)
}
