//! Command-line site assessment.
//!
//! Assesses a single coordinate or a JSON file of site requests against the
//! configured hazard layers and prints the result as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sitescope::climate::{DailyClimateRecord, DailySeries};
use sitescope::cost::WeatherSnapshot;
use sitescope::{Config, GeoPoint, SiteAssessor, SiteRequest};

#[derive(Parser, Debug)]
#[command(name = "assess")]
#[command(about = "Assess construction sites for flood, seismic and climate risk")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Earthquake zone GeoJSON, overrides the configured layer
    #[arg(long)]
    earthquake_zones: Option<PathBuf>,

    /// Flood extent GeoJSON, overrides the configured layer
    #[arg(long)]
    flood_extent: Option<PathBuf>,

    /// Site latitude
    #[arg(long, requires = "lng", conflicts_with = "sites")]
    lat: Option<f64>,

    /// Site longitude
    #[arg(long, requires = "lat")]
    lng: Option<f64>,

    /// JSON array of site requests to assess in parallel
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Base construction cost per square foot
    #[arg(long)]
    base_cost: Option<f64>,

    /// Site elevation in meters
    #[arg(long)]
    elevation: Option<f64>,

    /// Daily climate records, as a JSON array or a columnar `daily` object
    #[arg(long)]
    climate: Option<PathBuf>,

    /// Current temperature in °C, used when no climate records are given
    #[arg(long)]
    temperature: Option<f64>,

    /// Current relative humidity in %
    #[arg(long)]
    humidity: Option<f64>,

    /// Current wind speed in km/h
    #[arg(long)]
    wind_speed: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(path) = &args.earthquake_zones {
        config.hazards.earthquake_zones = Some(path.clone());
    }
    if let Some(path) = &args.flood_extent {
        config.hazards.flood_extent = Some(path.clone());
    }

    let assessor = SiteAssessor::from_config(&config)?;

    let output = if let Some(path) = &args.sites {
        let requests = load_site_requests(path)?;
        info!("Loaded {} site requests from {}", requests.len(), path.display());

        let results: Vec<serde_json::Value> = assessor
            .assess_batch(&requests)
            .into_iter()
            .map(|result| match result {
                Ok(assessment) => serde_json::to_value(assessment),
                Err(e) => {
                    warn!("Site assessment failed: {}", e);
                    Ok(serde_json::json!({ "error": e.to_string() }))
                }
            })
            .collect::<Result<_, _>>()?;
        serde_json::Value::Array(results)
    } else {
        let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
            bail!("either --lat/--lng or --sites is required");
        };

        let mut request = SiteRequest::new(GeoPoint::new(lat, lng));
        request.base_cost_per_unit_area = args.base_cost;
        request.elevation_m = args.elevation;
        if let Some(path) = &args.climate {
            request.climate_records = load_climate_records(path)?;
        }
        if args.temperature.is_some() || args.humidity.is_some() || args.wind_speed.is_some() {
            request.weather = Some(WeatherSnapshot {
                temperature_c: args.temperature,
                relative_humidity: args.humidity,
                wind_speed_kmh: args.wind_speed,
            });
        }

        serde_json::to_value(assessor.assess(&request)?)?
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

fn load_site_requests(path: &Path) -> Result<Vec<SiteRequest>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sites file {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse site requests")
}

/// Accepts either `[{"date": ...}, ...]` or `{"daily": {"time": [...], ...}}`
fn load_climate_records(path: &Path) -> Result<Vec<DailyClimateRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read climate file {}", path.display()))?;
    parse_climate_records(&content)
}

fn parse_climate_records(content: &str) -> Result<Vec<DailyClimateRecord>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse climate file")?;

    match value {
        serde_json::Value::Array(_) => {
            serde_json::from_value(value).context("Failed to parse daily climate records")
        }
        serde_json::Value::Object(mut map) => {
            let daily = map
                .remove("daily")
                .context("Climate object has no 'daily' field")?;
            let series: DailySeries =
                serde_json::from_value(daily).context("Failed to parse daily series")?;
            Ok(series.into_records())
        }
        _ => bail!("Climate file must be an array or an object"),
    }
}
