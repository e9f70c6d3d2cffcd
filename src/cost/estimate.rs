//! Composite cost multiplier and itemized breakdown.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::weather::{weather_cost_multiplier, WeatherSnapshot};
use crate::catalog::zone_info;
use crate::climate::{climate_cost_multiplier, ClimateData};
use crate::models::{EarthquakeZoneResult, FloodRisk, RiskLevel};

/// Area the illustrative totals are computed for (square feet)
pub const DEFAULT_REFERENCE_AREA: f64 = 1000.0;

/// Base cost per square foot when a request gives none
pub const DEFAULT_BASE_COST: f64 = 2000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("base cost per unit area must be finite and non-negative, got {0}")]
    InvalidBaseCost(f64),
    #[error("reference area must be finite and positive, got {0}")]
    InvalidReferenceArea(f64),
}

/// Risk dimension contributing to the cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostFactor {
    Earthquake,
    Flood,
    Elevation,
    Environmental,
}

impl std::fmt::Display for CostFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostFactor::Earthquake => write!(f, "Earthquake"),
            CostFactor::Flood => write!(f, "Flood"),
            CostFactor::Elevation => write!(f, "Elevation"),
            CostFactor::Environmental => write!(f, "Climate/Weather"),
        }
    }
}

/// Where the environmental multiplier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentalSource {
    Climate,
    Weather,
    Unavailable,
}

/// Everything the cost model reads for one site
#[derive(Debug, Clone, Copy)]
pub struct CostInputs<'a> {
    pub base_cost_per_unit_area: f64,
    pub reference_area: f64,
    pub flood: &'a FloodRisk,
    pub earthquake: Option<&'a EarthquakeZoneResult>,
    /// Meters above sea level
    pub elevation_m: Option<f64>,
    /// Preferred over `weather` when present
    pub climate: Option<&'a ClimateData>,
    pub weather: Option<&'a WeatherSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub earthquake: f64,
    pub flood: f64,
    pub elevation: f64,
    pub environmental: f64,
    /// Product of the four factors
    pub total: f64,
}

/// Extra cost attributable to one factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub factor: CostFactor,
    pub multiplier: f64,
    /// `base × (multiplier − 1)`
    pub cost_per_unit_area: f64,
    /// `cost_per_unit_area × reference_area`
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub base_cost_per_unit_area: f64,
    pub adjusted_cost_per_unit_area: f64,
    pub reference_area: f64,
    pub base_total_cost: f64,
    pub adjusted_total_cost: f64,
    pub multipliers: Multipliers,
    pub environmental_source: EnvironmentalSource,
    /// Positive contributions only, in factor order
    pub breakdown: Vec<CostComponent>,
}

/// Catalog multiplier of the matched seismic zone.
///
/// No zone, or a label missing from the catalog, is neutral.
pub fn earthquake_multiplier(zone: Option<&EarthquakeZoneResult>) -> f64 {
    zone.and_then(|z| zone_info(&z.zone))
        .map(|info| info.cost_multiplier)
        .unwrap_or(1.0)
}

pub fn flood_multiplier(flood: &FloodRisk) -> f64 {
    match flood.level {
        RiskLevel::HighRisk => 1.30,
        RiskLevel::MediumRisk => 1.15,
        RiskLevel::Safe => 1.0,
    }
}

/// Highest matching elevation tier; tiers do not accumulate
pub fn elevation_multiplier(elevation_m: Option<f64>) -> f64 {
    match elevation_m {
        Some(e) if e > 2000.0 => 1.15,
        Some(e) if e > 1000.0 => 1.10,
        Some(e) if e > 500.0 => 1.05,
        _ => 1.0,
    }
}

/// Climate multiplier when averages exist, else the weather fallback
pub fn environmental_multiplier(
    climate: Option<&ClimateData>,
    weather: Option<&WeatherSnapshot>,
) -> (f64, EnvironmentalSource) {
    match (climate, weather) {
        (Some(climate), _) => (climate_cost_multiplier(Some(climate)), EnvironmentalSource::Climate),
        (None, Some(weather)) => (weather_cost_multiplier(weather), EnvironmentalSource::Weather),
        (None, None) => (1.0, EnvironmentalSource::Unavailable),
    }
}

/// Estimate construction cost for a site
pub fn estimate_cost(inputs: &CostInputs<'_>) -> Result<CostEstimate, EstimateError> {
    let base = inputs.base_cost_per_unit_area;
    if !base.is_finite() || base < 0.0 {
        return Err(EstimateError::InvalidBaseCost(base));
    }
    let area = inputs.reference_area;
    if !area.is_finite() || area <= 0.0 {
        return Err(EstimateError::InvalidReferenceArea(area));
    }

    let earthquake = earthquake_multiplier(inputs.earthquake);
    let flood = flood_multiplier(inputs.flood);
    let elevation = elevation_multiplier(inputs.elevation_m);
    let (environmental, environmental_source) =
        environmental_multiplier(inputs.climate, inputs.weather);
    let total = earthquake * flood * elevation * environmental;

    let breakdown: Vec<CostComponent> = [
        (CostFactor::Earthquake, earthquake),
        (CostFactor::Flood, flood),
        (CostFactor::Elevation, elevation),
        (CostFactor::Environmental, environmental),
    ]
    .into_iter()
    .map(|(factor, multiplier)| {
        let cost_per_unit_area = base * (multiplier - 1.0);
        CostComponent {
            factor,
            multiplier,
            cost_per_unit_area,
            total_cost: cost_per_unit_area * area,
        }
    })
    .filter(|c| c.cost_per_unit_area > 0.0)
    .collect();

    let adjusted = base * total;
    debug!(
        "Cost multipliers: earthquake={} flood={} elevation={} environmental={} total={}",
        earthquake, flood, elevation, environmental, total
    );

    Ok(CostEstimate {
        base_cost_per_unit_area: base,
        adjusted_cost_per_unit_area: adjusted,
        reference_area: area,
        base_total_cost: base * area,
        adjusted_total_cost: adjusted * area,
        multipliers: Multipliers {
            earthquake,
            flood,
            elevation,
            environmental,
            total,
        },
        environmental_source,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(flood: &'a FloodRisk, zone: Option<&'a EarthquakeZoneResult>) -> CostInputs<'a> {
        CostInputs {
            base_cost_per_unit_area: 2000.0,
            reference_area: DEFAULT_REFERENCE_AREA,
            flood,
            earthquake: zone,
            elevation_m: None,
            climate: None,
            weather: None,
        }
    }

    #[test]
    fn test_zone_4_only() {
        let flood = FloodRisk::unknown();
        let zone = EarthquakeZoneResult::from_label("Zone 4".to_string());

        let estimate = estimate_cost(&inputs(&flood, Some(&zone))).unwrap();
        assert_eq!(estimate.multipliers.earthquake, 1.80);
        assert_eq!(estimate.multipliers.flood, 1.0);
        assert_eq!(estimate.multipliers.elevation, 1.0);
        assert_eq!(estimate.multipliers.environmental, 1.0);
        assert!((estimate.adjusted_cost_per_unit_area - 3600.0).abs() < 1e-9);
        assert_eq!(estimate.environmental_source, EnvironmentalSource::Unavailable);

        assert_eq!(estimate.breakdown.len(), 1);
        let quake = estimate.breakdown[0];
        assert_eq!(quake.factor, CostFactor::Earthquake);
        assert!((quake.cost_per_unit_area - 1600.0).abs() < 1e-9);
        assert!((quake.total_cost - 1_600_000.0).abs() < 1e-6);
        assert!((estimate.adjusted_total_cost - 3_600_000.0).abs() < 1e-6);
        assert_eq!(estimate.base_total_cost, 2_000_000.0);
    }

    #[test]
    fn test_total_is_product() {
        let flood = FloodRisk::classify(false, 2.0, 5.0);
        let zone = EarthquakeZoneResult::from_label("Zone 2B".to_string());
        let climate = ClimateData {
            temperature_2m_max: Some(37.0),
            precipitation_sum: Some(120.0),
            ..ClimateData::default()
        };
        let cost_inputs = CostInputs {
            elevation_m: Some(1500.0),
            climate: Some(&climate),
            ..inputs(&flood, Some(&zone))
        };

        let estimate = estimate_cost(&cost_inputs).unwrap();
        let m = estimate.multipliers;
        assert_eq!(m.total, m.earthquake * m.flood * m.elevation * m.environmental);
        assert_eq!(estimate.adjusted_cost_per_unit_area, 2000.0 * m.total);
        assert_eq!(m.flood, 1.15);
        assert_eq!(m.elevation, 1.10);
        assert!((m.environmental - 1.08).abs() < 1e-9);
        assert_eq!(estimate.environmental_source, EnvironmentalSource::Climate);
        assert_eq!(estimate.breakdown.len(), 4);
    }

    #[test]
    fn test_climate_preferred_over_weather() {
        let flood = FloodRisk::unknown();
        let climate = ClimateData::default();
        let weather = WeatherSnapshot {
            temperature_c: Some(45.0),
            ..WeatherSnapshot::default()
        };
        let with_both = CostInputs {
            climate: Some(&climate),
            weather: Some(&weather),
            ..inputs(&flood, None)
        };
        let estimate = estimate_cost(&with_both).unwrap();
        assert_eq!(estimate.multipliers.environmental, 1.0);
        assert_eq!(estimate.environmental_source, EnvironmentalSource::Climate);

        let weather_only = CostInputs {
            weather: Some(&weather),
            ..inputs(&flood, None)
        };
        let estimate = estimate_cost(&weather_only).unwrap();
        assert!((estimate.multipliers.environmental - 1.05).abs() < 1e-9);
        assert_eq!(estimate.environmental_source, EnvironmentalSource::Weather);
    }

    #[test]
    fn test_multiplier_tables() {
        assert_eq!(flood_multiplier(&FloodRisk::classify(true, 0.0, 5.0)), 1.30);
        assert_eq!(elevation_multiplier(Some(2500.0)), 1.15);
        assert_eq!(elevation_multiplier(Some(2000.0)), 1.10);
        assert_eq!(elevation_multiplier(Some(750.0)), 1.05);
        assert_eq!(elevation_multiplier(Some(500.0)), 1.0);
        assert_eq!(elevation_multiplier(None), 1.0);

        let unknown_zone = EarthquakeZoneResult::from_label("Zone 9".to_string());
        assert_eq!(earthquake_multiplier(Some(&unknown_zone)), 1.0);
        assert_eq!(earthquake_multiplier(None), 1.0);
    }

    #[test]
    fn test_neutral_site_has_empty_breakdown() {
        let flood = FloodRisk::unknown();
        let estimate = estimate_cost(&inputs(&flood, None)).unwrap();
        assert_eq!(estimate.multipliers.total, 1.0);
        assert_eq!(estimate.adjusted_cost_per_unit_area, 2000.0);
        assert!(estimate.breakdown.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        let flood = FloodRisk::unknown();
        let negative = CostInputs {
            base_cost_per_unit_area: -1.0,
            ..inputs(&flood, None)
        };
        assert_eq!(estimate_cost(&negative), Err(EstimateError::InvalidBaseCost(-1.0)));

        let no_area = CostInputs {
            reference_area: 0.0,
            ..inputs(&flood, None)
        };
        assert_eq!(estimate_cost(&no_area), Err(EstimateError::InvalidReferenceArea(0.0)));
    }
}
