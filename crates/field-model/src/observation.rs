//! Station observations as delivered by the upstream polling layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One station observation.
///
/// Every scalar field is independently nullable because sensors differ by
/// station type: a road-weather station reports road temperature but rarely
/// humidity, a buoy reports wind but no visibility, and so on. Coordinates
/// are always present. The absence of one scalar never invalidates the
/// observation for the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Upstream station identifier (FMISID or similar).
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Air temperature in °C.
    pub temperature: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Meteorological wind direction in degrees: the direction the wind
    /// blows FROM (0 = from north, 90 = from east).
    pub wind_direction: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Precipitation intensity in mm/h.
    pub precipitation: Option<f64>,
    /// Road surface temperature in °C.
    pub road_temperature: Option<f64>,
    /// Visibility in meters.
    pub visibility: Option<f64>,
    pub station_name: Option<String>,
    /// Which upstream feed this observation came from.
    pub source: String,
    pub time: DateTime<Utc>,
}

impl Observation {
    /// Create an observation with coordinates only; scalar fields are
    /// filled in by the caller.
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            temperature: None,
            wind_speed: None,
            wind_direction: None,
            humidity: None,
            precipitation: None,
            road_temperature: None,
            visibility: None,
            station_name: None,
            source: String::new(),
            time,
        }
    }

    /// Extract one scalar field by kind.
    pub fn scalar(&self, kind: ScalarKind) -> Option<f64> {
        match kind {
            ScalarKind::Temperature => self.temperature,
            ScalarKind::WindSpeed => self.wind_speed,
            ScalarKind::Humidity => self.humidity,
            ScalarKind::Precipitation => self.precipitation,
            ScalarKind::RoadTemperature => self.road_temperature,
            ScalarKind::Visibility => self.visibility,
        }
    }

    /// True when the observation carries both wind speed and direction,
    /// i.e. it can contribute to the wind vector field.
    pub fn has_wind(&self) -> bool {
        self.wind_speed.is_some() && self.wind_direction.is_some()
    }
}

/// Selector for the independently-nullable scalar fields of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Temperature,
    WindSpeed,
    Humidity,
    Precipitation,
    RoadTemperature,
    Visibility,
}

impl ScalarKind {
    /// Human-readable unit for legends and logging.
    pub fn unit(&self) -> &'static str {
        match self {
            ScalarKind::Temperature | ScalarKind::RoadTemperature => "°C",
            ScalarKind::WindSpeed => "m/s",
            ScalarKind::Humidity => "%",
            ScalarKind::Precipitation => "mm/h",
            ScalarKind::Visibility => "m",
        }
    }
}
