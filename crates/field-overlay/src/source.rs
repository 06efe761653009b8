//! Live/forecast data selection for the overlay drivers.
//!
//! Forecast data stays in its native grid+hours shape; observation-shaped
//! records for the selected hour are synthesized only inside the render
//! path (`Cow::Owned`) and dropped afterwards, so the grid remains the
//! single source of truth. Live mode borrows the most recent real
//! observations.

use std::borrow::Cow;

use field_model::{ForecastGrid, Observation};

/// Which data feeds the render path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Most recent real observations.
    Live,
    /// Pseudo-observations for one forecast hour.
    Forecast { hour: usize },
}

/// Holds the externally supplied data and the current mode.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    observations: Vec<Observation>,
    forecast: ForecastGrid,
    mode: Option<usize>,
}

impl DataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live observation set (called by the polling layer).
    pub fn set_observations(&mut self, observations: Vec<Observation>) {
        self.observations = observations;
    }

    /// Replace the forecast grid (called by the forecast-fetch layer).
    pub fn set_forecast(&mut self, forecast: ForecastGrid) {
        self.forecast = forecast;
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = match mode {
            RenderMode::Live => None,
            RenderMode::Forecast { hour } => Some(hour),
        };
    }

    pub fn mode(&self) -> RenderMode {
        match self.mode {
            None => RenderMode::Live,
            Some(hour) => RenderMode::Forecast { hour },
        }
    }

    pub fn forecast(&self) -> &ForecastGrid {
        &self.forecast
    }

    /// The observations the render path should consume right now. Forecast
    /// mode synthesizes transient pseudo-observations; live mode borrows.
    pub fn current(&self) -> Cow<'_, [Observation]> {
        match self.mode {
            None => Cow::Borrowed(self.observations.as_slice()),
            Some(hour) => Cow::Owned(self.forecast.observations_at(hour)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use field_model::{ForecastHour, ForecastPoint};

    fn source() -> DataSource {
        let mut src = DataSource::new();
        let mut obs = Observation::new("live-1", 60.0, 25.0, Utc::now());
        obs.temperature = Some(3.0);
        src.set_observations(vec![obs]);

        let now = Utc::now();
        src.set_forecast(ForecastGrid {
            points: vec![ForecastPoint {
                latitude: 61.0,
                longitude: 24.0,
                hours: vec![ForecastHour {
                    time: now,
                    temperature: -2.0,
                    wind_speed: 6.0,
                    wind_direction: 90.0,
                    precipitation: 0.0,
                    weather_code: 2,
                }],
            }],
            hours: vec![now],
        });
        src
    }

    #[test]
    fn test_live_mode_borrows_observations() {
        let src = source();
        let current = src.current();
        assert!(matches!(current, Cow::Borrowed(_)));
        assert_eq!(current[0].id, "live-1");
    }

    #[test]
    fn test_forecast_mode_synthesizes_transiently() {
        let mut src = source();
        src.set_mode(RenderMode::Forecast { hour: 0 });

        let current = src.current();
        assert!(matches!(current, Cow::Owned(_)));
        assert_eq!(current[0].temperature, Some(-2.0));

        // Reverting to live restores the real observations untouched.
        src.set_mode(RenderMode::Live);
        assert_eq!(src.current()[0].id, "live-1");
    }

    #[test]
    fn test_forecast_hour_out_of_range_is_empty() {
        let mut src = source();
        src.set_mode(RenderMode::Forecast { hour: 5 });
        assert!(src.current().is_empty());
    }
}
