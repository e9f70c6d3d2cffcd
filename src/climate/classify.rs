//! Climate zone decision table.

use serde::{Deserialize, Serialize};

/// Coarse climate class from mean temperature and precipitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    #[serde(rename = "Polar")]
    Polar,
    #[serde(rename = "Cold Desert")]
    ColdDesert,
    #[serde(rename = "Cold")]
    Cold,
    #[serde(rename = "Temperate Desert")]
    TemperateDesert,
    #[serde(rename = "Temperate Semi-Arid")]
    TemperateSemiArid,
    #[serde(rename = "Temperate")]
    Temperate,
    #[serde(rename = "Hot Desert")]
    HotDesert,
    #[serde(rename = "Hot Semi-Arid")]
    HotSemiArid,
    #[serde(rename = "Tropical Savanna")]
    TropicalSavanna,
    #[serde(rename = "Tropical")]
    Tropical,
}

impl ClimateZone {
    pub fn label(&self) -> &'static str {
        match self {
            ClimateZone::Polar => "Polar",
            ClimateZone::ColdDesert => "Cold Desert",
            ClimateZone::Cold => "Cold",
            ClimateZone::TemperateDesert => "Temperate Desert",
            ClimateZone::TemperateSemiArid => "Temperate Semi-Arid",
            ClimateZone::Temperate => "Temperate",
            ClimateZone::HotDesert => "Hot Desert",
            ClimateZone::HotSemiArid => "Hot Semi-Arid",
            ClimateZone::TropicalSavanna => "Tropical Savanna",
            ClimateZone::Tropical => "Tropical",
        }
    }
}

impl std::fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a climate from mean temperature (°C) and precipitation (mm).
pub fn classify_climate_zone(mean_temp_c: f64, precipitation_mm: f64) -> ClimateZone {
    let p = precipitation_mm;
    if mean_temp_c < 0.0 {
        ClimateZone::Polar
    } else if mean_temp_c < 10.0 {
        if p < 50.0 {
            ClimateZone::ColdDesert
        } else {
            ClimateZone::Cold
        }
    } else if mean_temp_c < 18.0 {
        if p < 50.0 {
            ClimateZone::TemperateDesert
        } else if p < 200.0 {
            ClimateZone::TemperateSemiArid
        } else {
            ClimateZone::Temperate
        }
    } else {
        // 18-25 °C and >= 25 °C use the same thresholds
        if p < 50.0 {
            ClimateZone::HotDesert
        } else if p < 200.0 {
            ClimateZone::HotSemiArid
        } else if p < 1000.0 {
            ClimateZone::TropicalSavanna
        } else {
            ClimateZone::Tropical
        }
    }
}
