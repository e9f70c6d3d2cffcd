//! Construction cost multiplier from long-term climate.

use super::ClimateData;

/// Cost multiplier for building in a given climate.
///
/// Starts at 1.0. The temperature terms form a single chain (heat first, then
/// cold); precipitation, humidity and wind each add independently. Missing
/// values add nothing.
pub fn climate_cost_multiplier(climate: Option<&ClimateData>) -> f64 {
    let Some(climate) = climate else {
        return 1.0;
    };

    let mut multiplier = 1.0;

    let max = climate.temperature_2m_max;
    let min = climate.temperature_2m_min;
    if max.is_some_and(|t| t > 40.0) {
        multiplier += 0.08;
    } else if max.is_some_and(|t| t > 35.0) {
        multiplier += 0.05;
    } else if min.is_some_and(|t| t < -10.0) {
        multiplier += 0.08;
    } else if min.is_some_and(|t| t < 0.0) {
        multiplier += 0.05;
    }

    if let Some(p) = climate.precipitation_sum {
        if p > 200.0 {
            multiplier += 0.06;
        } else if p > 100.0 {
            multiplier += 0.03;
        }
    }

    if let Some(h) = climate.relativehumidity_2m_mean {
        if h > 80.0 {
            multiplier += 0.04;
        } else if h > 70.0 {
            multiplier += 0.02;
        }
    }

    if let Some(w) = climate.windspeed_10m_mean {
        if w > 25.0 {
            multiplier += 0.05;
        } else if w > 15.0 {
            multiplier += 0.02;
        }
    }

    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_climate_is_neutral() {
        assert_eq!(climate_cost_multiplier(None), 1.0);
        assert_eq!(climate_cost_multiplier(Some(&ClimateData::default())), 1.0);
    }

    #[test]
    fn test_harsh_climate() {
        let climate = ClimateData {
            temperature_2m_max: Some(42.0),
            precipitation_sum: Some(250.0),
            relativehumidity_2m_mean: Some(85.0),
            windspeed_10m_mean: Some(30.0),
            ..ClimateData::default()
        };
        let m = climate_cost_multiplier(Some(&climate));
        assert!((m - 1.23).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_chain_is_exclusive() {
        // Hot summers take precedence over cold winters.
        let climate = ClimateData {
            temperature_2m_max: Some(38.0),
            temperature_2m_min: Some(-15.0),
            ..ClimateData::default()
        };
        assert!((climate_cost_multiplier(Some(&climate)) - 1.05).abs() < 1e-9);

        let cold = ClimateData {
            temperature_2m_max: Some(20.0),
            temperature_2m_min: Some(-15.0),
            ..ClimateData::default()
        };
        assert!((climate_cost_multiplier(Some(&cold)) - 1.08).abs() < 1e-9);

        let chilly = ClimateData {
            temperature_2m_min: Some(-3.0),
            ..ClimateData::default()
        };
        assert!((climate_cost_multiplier(Some(&chilly)) - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_moderate_bands() {
        let climate = ClimateData {
            precipitation_sum: Some(150.0),
            relativehumidity_2m_mean: Some(75.0),
            windspeed_10m_mean: Some(20.0),
            ..ClimateData::default()
        };
        assert!((climate_cost_multiplier(Some(&climate)) - 1.07).abs() < 1e-9);
    }
}
