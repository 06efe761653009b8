//! Configuration for the overlay drivers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use field_model::{FieldError, FieldResult};
use field_render::{DeviceClass, HeatmapConfig, ParticleConfig, WindFieldConfig};

/// Driver-level configuration, bundling the engine configs with the
/// debounce window and device class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Trailing-edge debounce window for viewport events, in milliseconds.
    pub debounce_ms: u64,

    /// Particle pool sizing.
    pub device_class: DeviceClass,

    pub heatmap: HeatmapConfig,
    pub wind_field: WindFieldConfig,
    pub particles: ParticleConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            device_class: DeviceClass::Desktop,
            heatmap: HeatmapConfig::default(),
            wind_field: WindFieldConfig::default(),
            particles: ParticleConfig::default(),
        }
    }
}

impl OverlayConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults on missing or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self {
            heatmap: HeatmapConfig::from_env(),
            wind_field: WindFieldConfig::from_env(),
            particles: ParticleConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = std::env::var("OVERLAY_DEBOUNCE_MS") {
            if let Ok(ms) = val.parse() {
                config.debounce_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("OVERLAY_DEVICE_CLASS") {
            config.device_class = DeviceClass::from_str(&val);
        }

        config
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FieldResult<()> {
        if self.heatmap.step == 0 {
            return Err(FieldError::Config("heatmap step must be at least 1".into()));
        }
        if self.heatmap.influence_radius <= 0.0 || self.wind_field.influence_radius <= 0.0 {
            return Err(FieldError::Config(
                "influence radii must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.particles.fade) {
            return Err(FieldError::Config(format!(
                "particle fade {} outside [0, 1]",
                self.particles.fade
            )));
        }
        if self.particles.speed_factor <= 0.0 {
            return Err(FieldError::Config(
                "particle speed factor must be positive".into(),
            ));
        }
        if self.particles.age_min == 0 {
            return Err(FieldError::Config(
                "particle minimum age must be at least 1 tick".into(),
            ));
        }
        Ok(())
    }
}
