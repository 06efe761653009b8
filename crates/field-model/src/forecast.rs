//! Forecast grid data as delivered by the upstream forecast-fetch layer.
//!
//! The forecast API returns a coarse regular grid of nodes (~64 points over
//! the region), each carrying ~48 hourly samples. Rendering never consumes
//! this shape directly: for the selected hour a transient set of
//! observation-shaped records is synthesized inside the render path, so the
//! grid stays the single source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::observation::Observation;

/// Source tag attached to synthesized pseudo-observations.
pub const FORECAST_SOURCE: &str = "forecast";

/// One hourly sample at a forecast grid node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastHour {
    pub time: DateTime<Utc>,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Meteorological wind direction in degrees FROM.
    pub wind_direction: f64,
    /// Precipitation intensity in mm/h.
    pub precipitation: f64,
    /// WMO weather interpretation code.
    pub weather_code: u8,
}

/// One node of the forecast grid with its ordered hourly samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub hours: Vec<ForecastHour>,
}

impl ForecastPoint {
    /// Synthesize a pseudo-observation for one hour of this node.
    ///
    /// Returns `None` when the hour index is out of range. The result is
    /// meant to flow straight into a render call and be dropped afterwards;
    /// storing it would create a second source of truth that could drift
    /// from the grid.
    pub fn observation_at(&self, hour: usize) -> Option<Observation> {
        let sample = self.hours.get(hour)?;

        let mut obs = Observation::new(
            format!("forecast:{:.2}:{:.2}", self.latitude, self.longitude),
            self.latitude,
            self.longitude,
            sample.time,
        );
        obs.temperature = Some(sample.temperature);
        obs.wind_speed = Some(sample.wind_speed);
        obs.wind_direction = Some(sample.wind_direction);
        obs.precipitation = Some(sample.precipitation);
        obs.source = FORECAST_SOURCE.to_string();
        Some(obs)
    }
}

/// The full forecast grid plus the hour labels supplied by the fetch layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastGrid {
    pub points: Vec<ForecastPoint>,
    /// Hour labels for the time slider; index-aligned with each node's
    /// `hours` sequence.
    pub hours: Vec<DateTime<Utc>>,
}

impl ForecastGrid {
    /// Synthesize pseudo-observations for every grid node at one hour.
    ///
    /// Nodes without data for that hour are skipped.
    pub fn observations_at(&self, hour: usize) -> Vec<Observation> {
        self.points
            .iter()
            .filter_map(|point| point.observation_at(hour))
            .collect()
    }

    /// Number of selectable hours.
    pub fn hour_count(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
