//! Pre-defined fixture data for common test scenarios.

use field_model::Observation;

/// A small JSON capture in the upstream observation feed shape: three
/// stations with different sensor sets (full, temperature-only, wind-only).
pub const OBSERVATIONS_JSON: &str = r#"[
  {
    "id": "100971",
    "latitude": 60.17523,
    "longitude": 24.94459,
    "temperature": 2.3,
    "windSpeed": 6.1,
    "windDirection": 225.0,
    "humidity": 87.0,
    "precipitation": 0.0,
    "roadTemperature": null,
    "visibility": 20000.0,
    "stationName": "Helsinki Kaisaniemi",
    "source": "fmi",
    "time": "2024-01-15T09:10:00Z"
  },
  {
    "id": "101786",
    "latitude": 64.93503,
    "longitude": 25.37521,
    "temperature": -7.5,
    "windSpeed": null,
    "windDirection": null,
    "humidity": null,
    "precipitation": null,
    "roadTemperature": -9.1,
    "visibility": null,
    "stationName": "Oulu Vihreäsaari",
    "source": "road",
    "time": "2024-01-15T09:08:00Z"
  },
  {
    "id": "101061",
    "latitude": 68.60381,
    "longitude": 27.41115,
    "temperature": null,
    "windSpeed": 11.4,
    "windDirection": 340.0,
    "humidity": null,
    "precipitation": null,
    "roadTemperature": null,
    "visibility": null,
    "stationName": "Ivalo lentoasema",
    "source": "fmi",
    "time": "2024-01-15T09:10:00Z"
  }
]"#;

/// Parse [`OBSERVATIONS_JSON`].
pub fn sample_observations() -> Vec<Observation> {
    serde_json::from_str(OBSERVATIONS_JSON).expect("fixture JSON is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_parses_with_mixed_sensors() {
        let obs = sample_observations();
        assert_eq!(obs.len(), 3);
        assert!(obs[0].has_wind());
        assert!(!obs[1].has_wind());
        assert_eq!(obs[2].temperature, None);
        assert!(obs[2].has_wind());
    }
}
