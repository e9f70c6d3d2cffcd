//! Site assessment service.
//!
//! Ties the hazard lookups, zone catalog, climate aggregation and cost model
//! together for a single point, or a batch of points in parallel.

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{zone_info, ZoneInfo};
use crate::climate::{aggregate_climate, ClimateData, DailyClimateRecord};
use crate::config::Config;
use crate::cost::{
    estimate_cost, CostEstimate, CostInputs, EstimateError, WeatherSnapshot, DEFAULT_BASE_COST,
    DEFAULT_REFERENCE_AREA,
};
use crate::hazard::{
    check_flood_risk, find_nearest_flood_point, load_feature_collection, EarthquakeZoneIndex,
    ScanLimits, DEFAULT_BUFFER_RADIUS_KM,
};
use crate::models::{EarthquakeZoneResult, FeatureCollection, FloodRisk, GeoPoint, NearestFloodPoint};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("invalid coordinate {0}")]
    InvalidPoint(GeoPoint),
    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

/// Hazard lookups for one point
#[derive(Debug, Clone, Serialize)]
pub struct HazardReport {
    pub point: GeoPoint,
    pub flood: FloodRisk,
    pub earthquake: Option<EarthquakeZoneResult>,
    pub zone_info: Option<&'static ZoneInfo>,
    pub nearest_flood: NearestFloodPoint,
}

/// Assessment request for one site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRequest {
    pub point: GeoPoint,
    /// Falls back to the assessor's default when absent
    #[serde(default)]
    pub base_cost_per_unit_area: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    /// Precomputed averages; take precedence over `climate_records`
    #[serde(default)]
    pub climate: Option<ClimateData>,
    #[serde(default)]
    pub climate_records: Vec<DailyClimateRecord>,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
}

impl SiteRequest {
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            base_cost_per_unit_area: None,
            elevation_m: None,
            climate: None,
            climate_records: Vec::new(),
            weather: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteAssessment {
    pub hazards: HazardReport,
    pub climate: Option<ClimateData>,
    pub cost: CostEstimate,
}

/// Assessment service over a fixed pair of hazard layers
pub struct SiteAssessor {
    flood: FeatureCollection,
    zones: EarthquakeZoneIndex,
    limits: ScanLimits,
    buffer_radius_km: f64,
    reference_area: f64,
    default_base_cost: f64,
}

impl SiteAssessor {
    /// Create an assessor with default scan limits, buffer and reference area
    pub fn new(flood: FeatureCollection, zones: FeatureCollection, zone_property: &str) -> Self {
        Self {
            flood,
            zones: EarthquakeZoneIndex::build(zones, zone_property),
            limits: ScanLimits::default(),
            buffer_radius_km: DEFAULT_BUFFER_RADIUS_KM,
            reference_area: DEFAULT_REFERENCE_AREA,
            default_base_cost: DEFAULT_BASE_COST,
        }
    }

    /// Load hazard layers and settings from configuration.
    ///
    /// A layer without a configured path is treated as empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        let load = |path: &Option<std::path::PathBuf>, name: &str| -> Result<FeatureCollection> {
            match path {
                Some(path) => load_feature_collection(path),
                None => {
                    warn!("No {} layer configured, lookups will find nothing", name);
                    Ok(FeatureCollection::default())
                }
            }
        };

        let flood = load(&config.hazards.flood_extent, "flood extent")?;
        let zones = load(&config.hazards.earthquake_zones, "earthquake zone")?;

        let assessor = Self::new(flood, zones, &config.hazards.zone_property)
            .with_limits(config.scan)
            .with_buffer_radius(config.flood.buffer_radius_km)
            .with_reference_area(config.cost.reference_area)
            .with_default_base_cost(config.cost.default_base_cost);

        info!(
            "Assessor ready: {} flood features, {} seismic zone polygons",
            assessor.flood.len(),
            assessor.zones.len()
        );
        Ok(assessor)
    }

    pub fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_buffer_radius(mut self, buffer_radius_km: f64) -> Self {
        self.buffer_radius_km = buffer_radius_km;
        self
    }

    pub fn with_reference_area(mut self, reference_area: f64) -> Self {
        self.reference_area = reference_area;
        self
    }

    /// Base cost used for requests that carry none
    pub fn with_default_base_cost(mut self, base_cost: f64) -> Self {
        self.default_base_cost = base_cost;
        self
    }

    /// Run every hazard lookup for a point
    pub fn hazards(&self, point: GeoPoint) -> HazardReport {
        let flood = check_flood_risk(point, &self.flood, self.buffer_radius_km, &self.limits);
        let earthquake = self.zones.find(point);
        let zone_info = earthquake.as_ref().and_then(|z| zone_info(&z.zone));
        let nearest_flood = find_nearest_flood_point(point, &self.flood, &self.limits);

        debug!(
            "Hazards at {}: flood={} zone={:?}",
            point,
            flood.level,
            earthquake.as_ref().map(|z| z.zone.as_str())
        );

        HazardReport {
            point,
            flood,
            earthquake,
            zone_info,
            nearest_flood,
        }
    }

    /// Full hazard and cost assessment for one site
    pub fn assess(&self, request: &SiteRequest) -> Result<SiteAssessment, AssessmentError> {
        if !request.point.is_valid() {
            return Err(AssessmentError::InvalidPoint(request.point));
        }

        let hazards = self.hazards(request.point);
        let climate = request
            .climate
            .clone()
            .or_else(|| aggregate_climate(&request.climate_records));

        let cost = estimate_cost(&CostInputs {
            base_cost_per_unit_area: request
                .base_cost_per_unit_area
                .unwrap_or(self.default_base_cost),
            reference_area: self.reference_area,
            flood: &hazards.flood,
            earthquake: hazards.earthquake.as_ref(),
            elevation_m: request.elevation_m,
            climate: climate.as_ref(),
            weather: request.weather.as_ref(),
        })?;

        Ok(SiteAssessment {
            hazards,
            climate,
            cost,
        })
    }

    /// Assess many sites in parallel; results keep the input order
    pub fn assess_batch(&self, requests: &[SiteRequest]) -> Vec<Result<SiteAssessment, AssessmentError>> {
        info!("Assessing {} sites", requests.len());
        requests.par_iter().map(|r| self.assess(r)).collect()
    }

    pub fn flood_layer(&self) -> &FeatureCollection {
        &self.flood
    }

    pub fn zone_index(&self) -> &EarthquakeZoneIndex {
        &self.zones
    }
}
