//! Hazard lookup results.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Distance reported when no hazard boundary could be measured
pub const UNKNOWN_DISTANCE_KM: f64 = 999.0;

/// Flood risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Safe")]
    Safe,
    #[serde(rename = "Medium Risk")]
    MediumRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "Safe"),
            RiskLevel::MediumRisk => write!(f, "Medium Risk"),
            RiskLevel::HighRisk => write!(f, "High Risk"),
        }
    }
}

/// Flood classification for a single point.
///
/// Build through [`FloodRisk::classify`] so `level` stays consistent with the
/// two flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodRisk {
    pub level: RiskLevel,
    /// Kilometers to the nearest measured flood boundary, 0 when inside
    pub distance: f64,
    pub in_flood_extent: bool,
    pub in_buffer: bool,
}

impl FloodRisk {
    pub fn classify(in_flood_extent: bool, distance: f64, buffer_radius_km: f64) -> Self {
        let in_buffer = !in_flood_extent && distance <= buffer_radius_km;
        let level = if in_flood_extent {
            RiskLevel::HighRisk
        } else if in_buffer {
            RiskLevel::MediumRisk
        } else {
            RiskLevel::Safe
        };

        Self {
            level,
            distance,
            in_flood_extent,
            in_buffer,
        }
    }

    /// Result for a point with no flood data around it
    pub fn unknown() -> Self {
        Self {
            level: RiskLevel::Safe,
            distance: UNKNOWN_DISTANCE_KM,
            in_flood_extent: false,
            in_buffer: false,
        }
    }
}

/// Seismic zone matched for a point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarthquakeZoneResult {
    pub zone: String,
    /// Peak ground acceleration band, same label as `zone`
    pub pga: String,
}

impl EarthquakeZoneResult {
    pub fn from_label(label: String) -> Self {
        Self {
            pga: label.clone(),
            zone: label,
        }
    }
}

/// Closest sampled flood boundary location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestFloodPoint {
    pub distance: f64,
    pub nearest_point: Option<GeoPoint>,
    /// Position of the winning feature in the flood collection
    pub feature_index: Option<usize>,
}

impl NearestFloodPoint {
    pub fn unknown() -> Self {
        Self {
            distance: UNKNOWN_DISTANCE_KM,
            nearest_point: None,
            feature_index: None,
        }
    }
}
