//! Request and response shapes for the HTTP API.

use serde::{Deserialize, Serialize};

use sitescope::climate::{DailyClimateRecord, DailySeries};
use sitescope::{AssessmentError, GeoPoint, SiteAssessment};

#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
}

impl PointQuery {
    pub fn to_point(&self) -> Result<GeoPoint, String> {
        let point = GeoPoint::new(self.lat, self.lng);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(format!("invalid coordinate {}", point))
        }
    }
}

/// Years an archive window may end in
const WINDOW_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Defaults to the year before the current one
    pub year: Option<i32>,
}

impl WindowQuery {
    pub fn to_year(&self, default_year: i32) -> Result<i32, String> {
        let year = self.year.unwrap_or(default_year);
        if WINDOW_YEARS.contains(&year) {
            Ok(year)
        } else {
            Err(format!(
                "year {} outside {}..={}",
                year,
                WINDOW_YEARS.start(),
                WINDOW_YEARS.end()
            ))
        }
    }
}

/// Climate aggregation body: either row records or the columnar `daily` payload
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClimateBody {
    Series { daily: DailySeries },
    Records { records: Vec<DailyClimateRecord> },
}

impl ClimateBody {
    pub fn into_records(self) -> Vec<DailyClimateRecord> {
        match self {
            ClimateBody::Series { daily } => daily.into_records(),
            ClimateBody::Records { records } => records,
        }
    }
}

/// One entry of a batch response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Assessed(Box<SiteAssessment>),
    Failed { error: String },
}

impl From<Result<SiteAssessment, AssessmentError>> for BatchItem {
    fn from(result: Result<SiteAssessment, AssessmentError>) -> Self {
        match result {
            Ok(assessment) => BatchItem::Assessed(Box::new(assessment)),
            Err(e) => BatchItem::Failed {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub flood_features: usize,
    pub seismic_zones: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_query_validation() {
        let ok = PointQuery { lat: 24.86, lng: 67.0 };
        assert_eq!(ok.to_point().unwrap(), GeoPoint::new(24.86, 67.0));

        let bad = PointQuery { lat: 91.0, lng: 0.0 };
        assert!(bad.to_point().is_err());
    }

    #[test]
    fn test_window_year_range() {
        assert_eq!(WindowQuery { year: None }.to_year(2024), Ok(2024));
        assert_eq!(WindowQuery { year: Some(2015) }.to_year(2024), Ok(2015));
        assert!(WindowQuery { year: Some(i32::MIN) }.to_year(2024).is_err());
        assert!(WindowQuery { year: Some(10_000) }.to_year(2024).is_err());
    }

    #[test]
    fn test_climate_body_shapes() {
        let series: ClimateBody = serde_json::from_str(
            r#"{"daily": {"time": ["2023-07-01", "2023-07-02"], "temperature_2m_mean": [30.0, 32.0]}}"#,
        )
        .unwrap();
        let records = series.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].temperature_2m_mean, Some(32.0));

        let rows: ClimateBody = serde_json::from_str(
            r#"{"records": [{"date": "2023-01-01", "precipitation_sum": 4.0}]}"#,
        )
        .unwrap();
        let records = rows.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].precipitation_sum, Some(4.0));
    }

    #[test]
    fn test_batch_item_error_shape() {
        let item = BatchItem::from(Err(AssessmentError::InvalidPoint(GeoPoint::new(100.0, 0.0))));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("invalid coordinate"));
    }
}
