//! Core data models for hazard lookups and risk results.

pub mod hazard;
pub mod point;
pub mod risk;

pub use hazard::{FeatureCollection, HazardFeature, HazardGeometry};
pub use point::GeoPoint;
pub use risk::{EarthquakeZoneResult, FloodRisk, NearestFloodPoint, RiskLevel, UNKNOWN_DISTANCE_KM};
