//! Construction cost model.
//!
//! Independent risk dimensions each yield a multiplier >= 1.0; the total is
//! their product, so compounding risks scale proportionally.

mod estimate;
mod weather;

pub use estimate::{
    earthquake_multiplier, elevation_multiplier, environmental_multiplier, estimate_cost,
    flood_multiplier, CostComponent, CostEstimate, CostFactor, CostInputs, EnvironmentalSource,
    EstimateError, Multipliers, DEFAULT_BASE_COST, DEFAULT_REFERENCE_AREA,
};
pub use weather::{weather_cost_multiplier, WeatherSnapshot};
