//! Long-term averages from sampled daily records.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classify::{classify_climate_zone, ClimateZone};
use super::sampling::Season;

/// One sampled day of historical weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyClimateRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub temperature_2m_mean: Option<f64>,
    #[serde(default)]
    pub temperature_2m_max: Option<f64>,
    #[serde(default)]
    pub temperature_2m_min: Option<f64>,
    /// mm
    #[serde(default)]
    pub precipitation_sum: Option<f64>,
    /// km/h
    #[serde(default)]
    pub windspeed_10m_mean: Option<f64>,
    /// %
    #[serde(default)]
    pub relativehumidity_2m_mean: Option<f64>,
}

impl DailyClimateRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            temperature_2m_mean: None,
            temperature_2m_max: None,
            temperature_2m_min: None,
            precipitation_sum: None,
            windspeed_10m_mean: None,
            relativehumidity_2m_mean: None,
        }
    }

    /// Daily mean, or the max/min midpoint when the mean was not reported
    fn mean_temperature(&self) -> Option<f64> {
        self.temperature_2m_mean.or(match (self.temperature_2m_max, self.temperature_2m_min) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        })
    }
}

/// Columnar daily payload as returned by archive weather services.
///
/// `time` drives the row count; variable columns may be shorter or absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailySeries {
    pub time: Vec<NaiveDate>,
    #[serde(default)]
    pub temperature_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_10m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub relativehumidity_2m_mean: Vec<Option<f64>>,
}

impl DailySeries {
    pub fn into_records(self) -> Vec<DailyClimateRecord> {
        let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

        self.time
            .iter()
            .enumerate()
            .map(|(i, date)| DailyClimateRecord {
                date: *date,
                temperature_2m_mean: at(&self.temperature_2m_mean, i),
                temperature_2m_max: at(&self.temperature_2m_max, i),
                temperature_2m_min: at(&self.temperature_2m_min, i),
                precipitation_sum: at(&self.precipitation_sum, i),
                windspeed_10m_mean: at(&self.windspeed_10m_mean, i),
                relativehumidity_2m_mean: at(&self.relativehumidity_2m_mean, i),
            })
            .collect()
    }
}

/// Averages over the days of one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAverages {
    pub temperature_2m_mean: Option<f64>,
    /// Average per-year precipitation total for the season, mm
    pub precipitation_sum: Option<f64>,
    pub days: usize,
}

/// Long-term climate at a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateData {
    pub temperature_2m_mean: Option<f64>,
    /// Average of daily maxima
    pub temperature_2m_max: Option<f64>,
    /// Average of daily minima
    pub temperature_2m_min: Option<f64>,
    /// Average per-year precipitation over the sampled days, mm
    pub precipitation_sum: Option<f64>,
    pub windspeed_10m_mean: Option<f64>,
    pub relativehumidity_2m_mean: Option<f64>,
    pub climate_zone: Option<ClimateZone>,
    #[serde(default)]
    pub winter: Option<SeasonalAverages>,
    #[serde(default)]
    pub summer: Option<SeasonalAverages>,
    #[serde(default)]
    pub sample_years: usize,
    #[serde(default)]
    pub sample_days: usize,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Average per-year total of daily precipitation
fn yearly_precipitation<'a>(records: impl Iterator<Item = &'a DailyClimateRecord>) -> Option<f64> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for r in records {
        if let Some(p) = r.precipitation_sum.filter(|p| p.is_finite()) {
            *by_year.entry(r.date.year()).or_default() += p;
        }
    }
    mean(by_year.into_values())
}

fn seasonal(records: &[DailyClimateRecord], season: Season) -> Option<SeasonalAverages> {
    let days: Vec<&DailyClimateRecord> = records.iter().filter(|r| Season::of(r.date) == season).collect();
    if days.is_empty() {
        return None;
    }

    Some(SeasonalAverages {
        temperature_2m_mean: mean(days.iter().filter_map(|r| r.mean_temperature())),
        precipitation_sum: yearly_precipitation(days.iter().copied()),
        days: days.len(),
    })
}

/// Aggregate sampled days into long-term climate averages.
///
/// Returns `None` for an empty sample.
pub fn aggregate_climate(records: &[DailyClimateRecord]) -> Option<ClimateData> {
    if records.is_empty() {
        return None;
    }

    let temperature_2m_mean = mean(records.iter().filter_map(|r| r.mean_temperature()));
    let precipitation_sum = yearly_precipitation(records.iter());
    let climate_zone =
        temperature_2m_mean.map(|t| classify_climate_zone(t, precipitation_sum.unwrap_or(0.0)));

    let mut years: Vec<i32> = records.iter().map(|r| r.date.year()).collect();
    years.sort_unstable();
    years.dedup();

    let climate = ClimateData {
        temperature_2m_mean,
        temperature_2m_max: mean(records.iter().filter_map(|r| r.temperature_2m_max)),
        temperature_2m_min: mean(records.iter().filter_map(|r| r.temperature_2m_min)),
        precipitation_sum,
        windspeed_10m_mean: mean(records.iter().filter_map(|r| r.windspeed_10m_mean)),
        relativehumidity_2m_mean: mean(records.iter().filter_map(|r| r.relativehumidity_2m_mean)),
        climate_zone,
        winter: seasonal(records, Season::Winter),
        summer: seasonal(records, Season::Summer),
        sample_years: years.len(),
        sample_days: records.len(),
    };

    debug!(
        "Aggregated {} days over {} years into {:?}",
        climate.sample_days, climate.sample_years, climate.climate_zone
    );

    Some(climate)
}
