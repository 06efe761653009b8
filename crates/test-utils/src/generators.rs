//! Generators for synthetic station and forecast data.
//!
//! The generators create predictable, verifiable data over a Finland-like
//! bounding box (lon 20–31.5°E, lat 59.8–70.1°N) so tests can reason about
//! values without shipping real feed captures.

use chrono::{Duration, TimeZone, Utc};
use field_model::{ForecastGrid, ForecastHour, ForecastPoint, Observation};

/// Bounding box the generators scatter stations across:
/// (min_lon, min_lat, max_lon, max_lat).
pub const REGION: (f64, f64, f64, f64) = (20.0, 59.8, 31.5, 70.1);

/// Generate `count` stations on a diagonal walk across the region.
///
/// Station `i` carries `temperature = -10 + i` °C, `wind_speed = 2 + (i %
/// 10)` m/s and `wind_direction = (i * 45) % 360`°, so any value can be
/// predicted from its index. Every third station reports no wind, which
/// exercises the has-wind filtering paths.
pub fn synthetic_stations(count: usize) -> Vec<Observation> {
    let (min_lon, min_lat, max_lon, max_lat) = REGION;
    let time = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.5
            };
            let mut obs = Observation::new(
                format!("synthetic-{}", i),
                min_lat + (max_lat - min_lat) * t,
                min_lon + (max_lon - min_lon) * t,
                time,
            );
            obs.temperature = Some(-10.0 + i as f64);
            if i % 3 != 0 {
                obs.wind_speed = Some(2.0 + (i % 10) as f64);
                obs.wind_direction = Some(((i * 45) % 360) as f64);
            }
            obs.station_name = Some(format!("Test station {}", i));
            obs.source = "synthetic".to_string();
            obs
        })
        .collect()
}

/// Generate an `nx` by `ny` forecast grid over the region with `hours`
/// hourly samples per node.
///
/// Node temperatures fall with latitude (northern nodes colder) and every
/// hour warms each node by 0.5 °C, so hour selection is observable in the
/// rendered field.
pub fn synthetic_forecast(nx: usize, ny: usize, hours: usize) -> ForecastGrid {
    let (min_lon, min_lat, max_lon, max_lat) = REGION;
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let hour_labels: Vec<_> = (0..hours)
        .map(|h| start + Duration::hours(h as i64))
        .collect();

    let mut points = Vec::with_capacity(nx * ny);
    for row in 0..ny {
        for col in 0..nx {
            let fx = col as f64 / (nx.max(2) - 1) as f64;
            let fy = row as f64 / (ny.max(2) - 1) as f64;
            let latitude = min_lat + (max_lat - min_lat) * fy;

            let samples = (0..hours)
                .map(|h| ForecastHour {
                    time: hour_labels[h],
                    temperature: 5.0 - (latitude - min_lat) + 0.5 * h as f64,
                    wind_speed: 3.0 + 4.0 * fx,
                    wind_direction: 225.0,
                    precipitation: 0.0,
                    weather_code: 3,
                })
                .collect();

            points.push(ForecastPoint {
                latitude,
                longitude: min_lon + (max_lon - min_lon) * fx,
                hours: samples,
            });
        }
    }

    ForecastGrid {
        points,
        hours: hour_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_values_predictable_from_index() {
        let stations = synthetic_stations(10);
        assert_eq!(stations.len(), 10);
        assert_eq!(stations[4].temperature, Some(-6.0));
        assert_eq!(stations[4].wind_speed, Some(6.0));
        // Every third station has no wind.
        assert!(!stations[0].has_wind());
        assert!(stations[1].has_wind());
    }

    #[test]
    fn test_forecast_grid_dimensions() {
        let grid = synthetic_forecast(8, 8, 48);
        assert_eq!(grid.points.len(), 64);
        assert_eq!(grid.hour_count(), 48);
        assert_eq!(grid.points[0].hours.len(), 48);
    }

    #[test]
    fn test_forecast_warms_by_hour() {
        let grid = synthetic_forecast(2, 2, 3);
        let node = &grid.points[0];
        assert!(node.hours[2].temperature > node.hours[0].temperature);
    }
}
