//! Sitescope - geospatial risk and cost assessment for construction sites
//!
//! This library provides the hazard lookups, climate aggregation and cost
//! model shared by the server and assess binaries.

pub mod assessment;
pub mod catalog;
pub mod climate;
pub mod config;
pub mod cost;
pub mod geometry;
pub mod hazard;
pub mod models;

pub use assessment::{AssessmentError, HazardReport, SiteAssessment, SiteAssessor, SiteRequest};
pub use config::Config;
pub use models::{EarthquakeZoneResult, FeatureCollection, FloodRisk, GeoPoint, NearestFloodPoint, RiskLevel};
