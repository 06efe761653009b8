//! Wind vector field: meteorological direction conversion and vector IDW.
//!
//! Station wind direction is meteorological: the direction the wind blows
//! FROM, degrees clockwise from north. The movement direction is the
//! opposite bearing, decomposed into an eastward component `u` and a
//! northward component `v`; `v` is then negated because screen y grows
//! downward. A north wind (0°) therefore moves particles toward positive
//! screen y.

use serde::{Deserialize, Serialize};
use tracing::debug;

use field_model::{Observation, Projection};

/// One projected station contributing to the wind field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSample {
    pub x: f32,
    pub y: f32,
    /// Eastward movement component in m/s.
    pub u: f32,
    /// Screen-space vertical movement component in m/s (positive = down).
    pub v: f32,
    pub speed: f32,
}

/// Interpolated wind at one pixel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindVector {
    pub u: f32,
    pub v: f32,
    pub speed: f32,
}

/// Configuration for wind field interpolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindFieldConfig {
    /// Maximum influence distance of a station in pixels. Fixed regardless
    /// of zoom level.
    pub influence_radius: f32,

    /// IDW power parameter.
    pub power: f32,
}

impl Default for WindFieldConfig {
    fn default() -> Self {
        Self {
            influence_radius: 400.0,
            power: 2.0,
        }
    }
}

impl WindFieldConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults on missing or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("WIND_INFLUENCE_RADIUS") {
            if let Ok(radius) = val.parse() {
                config.influence_radius = radius;
            }
        }

        if let Ok(val) = std::env::var("WIND_POWER") {
            if let Ok(power) = val.parse() {
                config.power = power;
            }
        }

        config
    }
}

/// The cached, viewport-projected wind field.
///
/// Recomputed whenever the observations or the viewport change, because a
/// field projected through a stale projection animates particles against
/// the wrong geography. Exclusively owned by the particle system that
/// computed it.
#[derive(Debug, Clone, Default)]
pub struct WindField {
    samples: Vec<WindSample>,
    config: WindFieldConfig,
}

impl WindField {
    /// Project every observation carrying both wind speed and direction
    /// through the current projection. Observations missing either field
    /// are excluded, not an error.
    pub fn from_observations(
        observations: &[Observation],
        projection: &dyn Projection,
        config: WindFieldConfig,
    ) -> Self {
        let samples: Vec<WindSample> = observations
            .iter()
            .filter_map(|obs| {
                let speed = obs.wind_speed? as f32;
                let direction = obs.wind_direction? as f32;
                let pos = projection.project(obs.longitude, obs.latitude);

                // Rotate FROM-direction 180° into the movement bearing,
                // then decompose; negate v for the downward screen y-axis.
                let bearing = (direction + 180.0).to_radians();
                let u = speed * bearing.sin();
                let v = -(speed * bearing.cos());

                Some(WindSample {
                    x: pos.x,
                    y: pos.y,
                    u,
                    v,
                    speed,
                })
            })
            .collect();

        debug!(
            stations = samples.len(),
            of = observations.len(),
            "computed wind field"
        );

        Self { samples, config }
    }

    /// Vector-valued IDW at one pixel position. Returns `None` when no
    /// station lies within the influence radius; the caller treats that as
    /// zero wind for the tick.
    pub fn interpolate(&self, x: f32, y: f32) -> Option<WindVector> {
        let radius_sq = self.config.influence_radius * self.config.influence_radius;
        let mut weight_sum = 0.0f32;
        let mut u = 0.0f32;
        let mut v = 0.0f32;
        let mut speed = 0.0f32;

        for sample in &self.samples {
            let dx = sample.x - x;
            let dy = sample.y - y;
            let dist_sq = dx * dx + dy * dy;

            if dist_sq < 1e-6 {
                return Some(WindVector {
                    u: sample.u,
                    v: sample.v,
                    speed: sample.speed,
                });
            }
            if dist_sq > radius_sq {
                continue;
            }

            let weight = 1.0 / dist_sq.sqrt().powf(self.config.power);
            weight_sum += weight;
            u += weight * sample.u;
            v += weight * sample.v;
            speed += weight * sample.speed;
        }

        if weight_sum > 0.0 {
            Some(WindVector {
                u: u / weight_sum,
                v: v / weight_sum,
                speed: speed / weight_sum,
            })
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[WindSample] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;
    use field_model::PixelPos;

    struct IdentityProjection;

    impl Projection for IdentityProjection {
        fn project(&self, longitude: f64, latitude: f64) -> PixelPos {
            PixelPos::new(longitude as f32, latitude as f32)
        }
    }

    fn station(lon: f64, lat: f64, speed: f64, direction: f64) -> Observation {
        let mut obs = Observation::new("test", lat, lon, Utc::now());
        obs.wind_speed = Some(speed);
        obs.wind_direction = Some(direction);
        obs
    }

    #[test]
    fn test_north_wind_moves_particles_down_screen() {
        // Wind FROM the north at 10 m/s blows toward the south, which on a
        // downward-increasing y-axis is positive v.
        let field = WindField::from_observations(
            &[station(100.0, 100.0, 10.0, 0.0)],
            &IdentityProjection,
            WindFieldConfig::default(),
        );

        let wind = field.interpolate(100.0, 100.0).unwrap();
        assert_relative_eq!(wind.u, 0.0, epsilon = 1e-4);
        assert_relative_eq!(wind.v, 10.0, epsilon = 1e-4);
        assert_relative_eq!(wind.speed, 10.0);
    }

    #[test]
    fn test_west_wind_moves_particles_east() {
        // Wind FROM the west (270°) blows toward the east: positive u, no
        // vertical component.
        let field = WindField::from_observations(
            &[station(100.0, 100.0, 5.0, 270.0)],
            &IdentityProjection,
            WindFieldConfig::default(),
        );

        let wind = field.interpolate(100.0, 100.0).unwrap();
        assert_relative_eq!(wind.u, 5.0, epsilon = 1e-4);
        assert_relative_eq!(wind.v, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_observations_without_wind_are_excluded() {
        let mut no_direction = station(10.0, 10.0, 4.0, 90.0);
        no_direction.wind_direction = None;
        let mut no_speed = station(20.0, 20.0, 4.0, 90.0);
        no_speed.wind_speed = None;

        let field = WindField::from_observations(
            &[no_direction, no_speed],
            &IdentityProjection,
            WindFieldConfig::default(),
        );
        assert!(field.is_empty());
        assert_eq!(field.interpolate(10.0, 10.0), None);
    }

    #[test]
    fn test_out_of_range_returns_none() {
        let field = WindField::from_observations(
            &[station(0.0, 0.0, 10.0, 0.0)],
            &IdentityProjection,
            WindFieldConfig::default(),
        );
        assert_eq!(field.interpolate(10_000.0, 0.0), None);
    }

    #[test]
    fn test_two_station_blend() {
        let field = WindField::from_observations(
            &[station(0.0, 0.0, 10.0, 0.0), station(100.0, 0.0, 20.0, 0.0)],
            &IdentityProjection,
            WindFieldConfig::default(),
        );

        // Equidistant from both stations: the speed is their mean.
        let wind = field.interpolate(50.0, 0.0).unwrap();
        assert_relative_eq!(wind.speed, 15.0, epsilon = 1e-3);
    }
}
