//! Which historical days to sample for a climate estimate.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half of the year a sampled day belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Summer,
}

impl Season {
    /// October through March is winter, April through September summer
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            4..=9 => Season::Summer,
            _ => Season::Winter,
        }
    }
}

/// Contiguous date range to request from an archive service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleWindow {
    pub season: Season,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Multi-year two-season sampling.
///
/// Each sampled year contributes one winter and one summer window rather
/// than the whole year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SamplingPlan {
    /// Number of past years to sample
    pub years: u32,
    /// First and last month (inclusive) of the winter window
    pub winter_months: (u32, u32),
    /// First and last month (inclusive) of the summer window
    pub summer_months: (u32, u32),
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self {
            years: 5,
            winter_months: (1, 2),
            summer_months: (7, 8),
        }
    }
}

impl SamplingPlan {
    /// Windows for the `years` years ending with `latest_year`, oldest first.
    ///
    /// Windows with an invalid month range are left out.
    pub fn windows(&self, latest_year: i32) -> Vec<SampleWindow> {
        let first_year = i32::try_from(self.years)
            .ok()
            .filter(|years| *years > 0)
            .and_then(|years| latest_year.checked_sub(years - 1));
        let Some(first_year) = first_year else {
            return Vec::new();
        };

        (first_year..=latest_year)
            .flat_map(|year| {
                [
                    (Season::Winter, self.winter_months),
                    (Season::Summer, self.summer_months),
                ]
                .into_iter()
                .filter_map(move |(season, months)| window(year, season, months))
            })
            .collect()
    }
}

fn window(year: i32, season: Season, (first, last): (u32, u32)) -> Option<SampleWindow> {
    if first > last {
        return None;
    }
    let start = NaiveDate::from_ymd_opt(year, first, 1)?;
    let next_month = if last == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, last + 1, 1)?
    };

    Some(SampleWindow {
        season,
        start,
        end: next_month.pred_opt()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_windows() {
        let windows = SamplingPlan::default().windows(2024);
        assert_eq!(windows.len(), 10);

        assert_eq!(
            windows[0],
            SampleWindow {
                season: Season::Winter,
                start: date(2020, 1, 1),
                end: date(2020, 2, 29),
            }
        );
        assert_eq!(windows[1].start, date(2020, 7, 1));
        assert_eq!(windows[1].end, date(2020, 8, 31));
        assert_eq!(windows[9].season, Season::Summer);
        assert_eq!(windows[9].end, date(2024, 8, 31));
    }

    #[test]
    fn test_december_window_crosses_year_end() {
        let plan = SamplingPlan {
            years: 1,
            winter_months: (11, 12),
            summer_months: (6, 6),
        };
        let windows = plan.windows(2023);
        assert_eq!(windows[0].end, date(2023, 12, 31));
        assert_eq!(windows[1].start, date(2023, 6, 1));
        assert_eq!(windows[1].end, date(2023, 6, 30));
    }

    #[test]
    fn test_invalid_months_skipped() {
        let plan = SamplingPlan {
            years: 2,
            winter_months: (13, 14),
            summer_months: (8, 7),
        };
        assert!(plan.windows(2023).is_empty());
    }

    #[test]
    fn test_extreme_years_yield_nothing() {
        assert!(SamplingPlan::default().windows(i32::MIN).is_empty());
        assert!(SamplingPlan::default().windows(i32::MAX).is_empty());

        let too_many = SamplingPlan {
            years: u32::MAX,
            ..SamplingPlan::default()
        };
        assert!(too_many.windows(2024).is_empty());

        let none = SamplingPlan {
            years: 0,
            ..SamplingPlan::default()
        };
        assert!(none.windows(2024).is_empty());
    }

    #[test]
    fn test_season_of_date() {
        assert_eq!(Season::of(date(2023, 1, 15)), Season::Winter);
        assert_eq!(Season::of(date(2023, 7, 15)), Season::Summer);
        assert_eq!(Season::of(date(2023, 11, 2)), Season::Winter);
    }
}
