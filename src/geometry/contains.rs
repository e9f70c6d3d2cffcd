//! Point-in-polygon tests.

use geo::{Coord, Intersects, Polygon};
use tracing::debug;

use super::GeometryError;
use crate::models::{GeoPoint, HazardGeometry};

/// Check that a polygon can take part in a containment test.
///
/// The outer ring needs at least 4 closed positions and every ring must be
/// made of finite coordinates.
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<(), GeometryError> {
    let exterior = polygon.exterior();
    if exterior.0.len() < 4 {
        return Err(GeometryError::DegenerateRing(exterior.0.len()));
    }

    let rings = std::iter::once(exterior).chain(polygon.interiors());
    for ring in rings {
        if let Some(c) = ring.0.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { x: c.x, y: c.y });
        }
    }

    Ok(())
}

/// Containment of a point in a single polygon.
///
/// Points inside a hole are outside; points on any ring count as inside.
pub fn polygon_contains(polygon: &Polygon<f64>, point: GeoPoint) -> Result<bool, GeometryError> {
    validate_polygon(polygon)?;
    Ok(polygon.intersects(&Coord::from(point)))
}

/// Containment of a point in a hazard geometry.
///
/// A `MultiPolygon` matches if any member matches. Polygons that fail
/// validation are skipped.
pub fn point_in_polygon(point: GeoPoint, geometry: &HazardGeometry) -> bool {
    geometry
        .polygons()
        .iter()
        .enumerate()
        .any(|(i, polygon)| match polygon_contains(polygon, point) {
            Ok(inside) => inside,
            Err(e) => {
                debug!("Skipping polygon {} in containment test: {}", i, e);
                false
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, LineString, MultiPolygon};

    fn square(min: f64, max: f64) -> Polygon<f64> {
        polygon![
            (x: min, y: min),
            (x: max, y: min),
            (x: max, y: max),
            (x: min, y: max),
        ]
    }

    #[test]
    fn test_point_inside_polygon() {
        let geometry = HazardGeometry::from(square(0.0, 10.0));
        assert!(point_in_polygon(GeoPoint::new(5.0, 5.0), &geometry));
        assert!(point_in_polygon(GeoPoint::new(0.5, 9.5), &geometry));
        assert!(!point_in_polygon(GeoPoint::new(11.0, 5.0), &geometry));
        assert!(!point_in_polygon(GeoPoint::new(-40.0, 120.0), &geometry));
    }

    #[test]
    fn test_point_on_boundary_counts_as_inside() {
        let geometry = HazardGeometry::from(square(0.0, 10.0));
        assert!(point_in_polygon(GeoPoint::new(0.0, 5.0), &geometry));
    }

    #[test]
    fn test_point_in_hole_is_outside() {
        let outer = square(0.0, 10.0).exterior().clone();
        let hole = square(4.0, 6.0).exterior().clone();
        let geometry = HazardGeometry::from(Polygon::new(outer, vec![hole]));

        assert!(!point_in_polygon(GeoPoint::new(5.0, 5.0), &geometry));
        assert!(point_in_polygon(GeoPoint::new(2.0, 2.0), &geometry));
    }

    #[test]
    fn test_multipolygon_any_member() {
        let geometry =
            HazardGeometry::from(MultiPolygon::new(vec![square(0.0, 1.0), square(20.0, 21.0)]));
        assert!(point_in_polygon(GeoPoint::new(20.5, 20.5), &geometry));
        assert!(!point_in_polygon(GeoPoint::new(10.0, 10.0), &geometry));
    }

    #[test]
    fn test_degenerate_member_is_skipped() {
        let degenerate = Polygon::new(
            LineString::from(vec![(20.0, 20.0), (21.0, 21.0)]),
            vec![],
        );
        assert!(matches!(
            validate_polygon(&degenerate),
            Err(GeometryError::DegenerateRing(_))
        ));

        let geometry = HazardGeometry::from(MultiPolygon::new(vec![degenerate, square(0.0, 1.0)]));
        assert!(point_in_polygon(GeoPoint::new(0.5, 0.5), &geometry));
    }

    #[test]
    fn test_non_finite_polygon_rejected() {
        let bad = polygon![
            (x: 0.0, y: 0.0),
            (x: f64::NAN, y: 0.0),
            (x: 1.0, y: 1.0),
        ];
        assert!(matches!(
            polygon_contains(&bad, GeoPoint::new(0.2, 0.5)),
            Err(GeometryError::NonFiniteCoordinate { .. })
        ));
        assert!(!point_in_polygon(GeoPoint::new(0.2, 0.5), &HazardGeometry::from(bad)));
    }

    #[test]
    fn test_empty_multipolygon() {
        let geometry = HazardGeometry::from(MultiPolygon::<f64>::new(vec![]));
        assert!(!point_in_polygon(GeoPoint::new(0.0, 0.0), &geometry));
    }
}
