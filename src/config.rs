use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::climate::SamplingPlan;
use crate::cost::{DEFAULT_BASE_COST, DEFAULT_REFERENCE_AREA};
use crate::hazard::{ScanLimits, DEFAULT_BUFFER_RADIUS_KM, DEFAULT_ZONE_PROPERTY};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub hazards: HazardsConfig,
    pub flood: FloodConfig,
    pub scan: ScanLimits,
    pub cost: CostConfig,
    pub climate: SamplingPlan,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HazardsConfig {
    pub earthquake_zones: Option<PathBuf>,
    pub flood_extent: Option<PathBuf>,
    /// Property holding the PGA zone label
    pub zone_property: String,
}

impl Default for HazardsConfig {
    fn default() -> Self {
        Self {
            earthquake_zones: None,
            flood_extent: None,
            zone_property: DEFAULT_ZONE_PROPERTY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FloodConfig {
    pub buffer_radius_km: f64,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            buffer_radius_km: DEFAULT_BUFFER_RADIUS_KM,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CostConfig {
    /// Square feet
    pub reference_area: f64,
    pub default_base_cost: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            reference_area: DEFAULT_REFERENCE_AREA,
            default_base_cost: DEFAULT_BASE_COST,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.flood.buffer_radius_km, 5.0);
        assert_eq!(config.scan, ScanLimits::default());
        assert_eq!(config.hazards.zone_property, "PGA");
        assert_eq!(config.cost.reference_area, 1000.0);
        assert_eq!(config.server.listen, "0.0.0.0:3000");
        assert_eq!(config.climate.years, 5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[hazards]
earthquake_zones = "data/earthquake_zones.geojson"
flood_extent = "data/flood_extent.geojson"

[flood]
buffer_radius_km = 3.5

[scan]
containment = 50

[climate]
years = 3
summer_months = [6, 8]

[server]
listen = "127.0.0.1:8080"
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(
            config.hazards.flood_extent,
            Some(PathBuf::from("data/flood_extent.geojson"))
        );
        assert_eq!(config.flood.buffer_radius_km, 3.5);
        assert_eq!(config.scan.containment, 50);
        assert_eq!(config.scan.distance, 5);
        assert_eq!(config.climate.years, 3);
        assert_eq!(config.climate.summer_months, (6, 8));
        assert_eq!(config.climate.winter_months, (1, 2));
        assert_eq!(config.server.listen, "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load_from_file("/nonexistent/sitescope.toml").is_err());
    }
}
