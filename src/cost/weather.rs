//! Current-weather fallback for the environmental multiplier.

use serde::{Deserialize, Serialize};

/// Current conditions at a site
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(default)]
    pub temperature_c: Option<f64>,
    /// %
    #[serde(default)]
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed_kmh: Option<f64>,
}

/// Environmental multiplier from a single weather reading.
///
/// Used only when no climate averages are available. Unlike the climate
/// model, the muggy-day term stacks with the humidity and temperature terms.
pub fn weather_cost_multiplier(weather: &WeatherSnapshot) -> f64 {
    let mut multiplier = 1.0;
    let temp = weather.temperature_c;
    let humidity = weather.relative_humidity;

    if humidity.is_some_and(|h| h > 80.0) {
        multiplier += 0.03;
    }
    if temp.is_some_and(|t| t > 40.0 || t < 0.0) {
        multiplier += 0.05;
    }
    if weather.wind_speed_kmh.is_some_and(|w| w > 30.0) {
        multiplier += 0.04;
    }
    if let (Some(h), Some(t)) = (humidity, temp) {
        if h > 85.0 && t > 15.0 && t < 35.0 {
            multiplier += 0.02;
        }
    }

    multiplier
}
