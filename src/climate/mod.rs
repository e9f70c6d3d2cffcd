//! Climate classification from sampled historical daily records.
//!
//! Records come from an external archive service; this module only turns
//! them into long-term averages, a climate zone and a cost multiplier.

mod aggregate;
mod classify;
mod multiplier;
mod sampling;

pub use aggregate::{aggregate_climate, ClimateData, DailyClimateRecord, DailySeries, SeasonalAverages};
pub use classify::{classify_climate_zone, ClimateZone};
pub use multiplier::climate_cost_multiplier;
pub use sampling::{SampleWindow, SamplingPlan, Season};
