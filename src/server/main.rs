//! HTTP server for site hazard and cost assessment.
//!
//! Loads the hazard layers once at startup and answers point lookups,
//! zone catalog queries, climate aggregation and full assessments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Datelike;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use sitescope::catalog::{all_zones, zone_info, ZoneInfo};
use sitescope::climate::{aggregate_climate, ClimateData, SampleWindow, SamplingPlan};
use sitescope::{Config, HazardReport, SiteAssessment, SiteAssessor, SiteRequest};

mod params;
use params::{BatchItem, ClimateBody, HealthResponse, PointQuery, WindowQuery};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Construction site risk assessment server")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the configured one
    #[arg(short, long)]
    listen: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    assessor: SiteAssessor,
    sampling: SamplingPlan,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Sitescope Server");

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    let assessor = SiteAssessor::from_config(&config)?;
    let listen = args.listen.unwrap_or_else(|| config.server.listen.clone());

    let state = Arc::new(AppState {
        assessor,
        sampling: config.climate,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/hazards", get(hazards_handler))
        .route("/v1/zones", get(zones_handler))
        .route("/v1/zones/{label}", get(zone_handler))
        .route("/v1/climate", post(climate_handler))
        .route("/v1/climate/windows", get(windows_handler))
        .route("/v1/assess", post(assess_handler))
        .route("/v1/assess/batch", post(assess_batch_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", listen);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        flood_features: state.assessor.flood_layer().len(),
        seismic_zones: state.assessor.zone_index().len(),
    })
}

/// Flood, seismic zone and nearest flood point for one coordinate
async fn hazards_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointQuery>,
) -> Result<Json<HazardReport>, (StatusCode, String)> {
    let point = params
        .to_point()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let report = run_blocking(move || state.assessor.hazards(point)).await?;
    Ok(Json(report))
}

async fn zones_handler() -> Json<&'static [ZoneInfo]> {
    Json(all_zones())
}

async fn zone_handler(
    Path(label): Path<String>,
) -> Result<Json<&'static ZoneInfo>, (StatusCode, String)> {
    zone_info(&label)
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown zone '{}'", label)))
}

/// Aggregate sampled daily records into climate averages
async fn climate_handler(
    Json(body): Json<ClimateBody>,
) -> Result<Json<ClimateData>, (StatusCode, String)> {
    aggregate_climate(&body.into_records())
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "no daily records to aggregate".to_string(),
            )
        })
}

/// Date windows to fetch from an archive service for a climate estimate
async fn windows_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<Vec<SampleWindow>>, (StatusCode, String)> {
    let year = params
        .to_year(chrono::Utc::now().year() - 1)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    Ok(Json(state.sampling.windows(year)))
}

async fn assess_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SiteRequest>,
) -> Result<Json<SiteAssessment>, (StatusCode, String)> {
    run_blocking(move || state.assessor.assess(&request))
        .await?
        .map(Json)
        .map_err(|e| {
            warn!("Assessment rejected: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        })
}

/// Assess many sites; failures are reported per entry
async fn assess_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<SiteRequest>>,
) -> Result<Json<Vec<BatchItem>>, (StatusCode, String)> {
    let results = run_blocking(move || state.assessor.assess_batch(&requests)).await?;
    Ok(Json(results.into_iter().map(BatchItem::from).collect()))
}

/// Run polygon work off the async workers
async fn run_blocking<T, F>(work: F) -> Result<T, (StatusCode, String)>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Assessment task failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })
}
