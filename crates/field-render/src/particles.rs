//! Wind particle system: a pool of particles advected through the
//! interpolated wind field, drawn as fading additive trails.
//!
//! The trail surface is a tiny-skia pixmap in premultiplied RGBA. Each tick
//! first multiplies every channel by the fade factor (correct in
//! premultiplied space), then strokes one segment per moving particle with
//! additive blending so overlapping trails brighten instead of overwriting.
//! Every operation is defensive: a missing surface, a missing wind field or
//! an empty pool degrades to a no-op.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tiny_skia::{BlendMode, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use field_model::{FieldError, FieldResult, Viewport};

use crate::scale::{wind_speed_scale, ColorScale};
use crate::wind::WindField;

/// Pool sizing by host device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Desktop,
    Constrained,
}

impl DeviceClass {
    pub fn pool_size(&self) -> usize {
        match self {
            DeviceClass::Desktop => 800,
            DeviceClass::Constrained => 400,
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "constrained" | "mobile" => DeviceClass::Constrained,
            _ => DeviceClass::Desktop,
        }
    }
}

/// Configuration for the particle simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Per-tick multiplier on every trail channel; bounds the trail length.
    pub fade: f32,

    /// Pixels moved per tick per m/s of wind.
    pub speed_factor: f32,

    /// Stroke width of trail segments in pixels.
    pub trail_width: f32,

    /// Minimum particle lifetime in ticks.
    pub age_min: u32,

    /// Random extra lifetime span in ticks; per-spawn randomization keeps
    /// the population from expiring in synchronized pulses.
    pub age_span: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            fade: 0.92,
            speed_factor: 0.3,
            trail_width: 1.5,
            age_min: 60,
            age_span: 120,
        }
    }
}

impl ParticleConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults on missing or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PARTICLE_FADE") {
            if let Ok(fade) = val.parse() {
                config.fade = fade;
            }
        }

        if let Ok(val) = std::env::var("PARTICLE_SPEED_FACTOR") {
            if let Ok(factor) = val.parse() {
                config.speed_factor = factor;
            }
        }

        if let Ok(val) = std::env::var("PARTICLE_TRAIL_WIDTH") {
            if let Ok(width) = val.parse() {
                config.trail_width = width;
            }
        }

        if let Ok(val) = std::env::var("PARTICLE_AGE_MIN") {
            if let Ok(age) = val.parse() {
                config.age_min = age;
            }
        }

        if let Ok(val) = std::env::var("PARTICLE_AGE_SPAN") {
            if let Ok(span) = val.parse() {
                config.age_span = span;
            }
        }

        config
    }
}

/// One particle of the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub prev_x: f32,
    pub prev_y: f32,
    pub age: u32,
    pub max_age: u32,
}

/// The wind particle system.
///
/// Owns the particle pool, the cached wind field and the trail surface
/// exclusively; nothing here is shared. Dropping the system releases all
/// three.
pub struct ParticleSystem {
    viewport: Viewport,
    surface: Option<Pixmap>,
    particles: Vec<Particle>,
    pool_size: usize,
    wind_field: Option<WindField>,
    config: ParticleConfig,
    scale: ColorScale,
    rng: SmallRng,
}

impl ParticleSystem {
    /// Allocate the pool and trail surface for a viewport. A zero-size
    /// viewport produces a system with no surface whose operations all
    /// no-op. Pass a seed for deterministic spawns in tests.
    pub fn new(
        viewport: Viewport,
        device_class: DeviceClass,
        config: ParticleConfig,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let surface = if viewport.is_empty() {
            None
        } else {
            Pixmap::new(viewport.width, viewport.height)
        };

        let pool_size = device_class.pool_size();
        let particles = if surface.is_some() {
            (0..pool_size)
                .map(|_| spawn(&mut rng, viewport, &config))
                .collect()
        } else {
            Vec::new()
        };

        debug!(
            width = viewport.width,
            height = viewport.height,
            particles = particles.len(),
            "initialized particle system"
        );

        Self {
            viewport,
            surface,
            particles,
            pool_size,
            wind_field: None,
            config,
            scale: wind_speed_scale(),
            rng,
        }
    }

    /// Install a freshly computed wind field, replacing any previous one.
    pub fn set_wind_field(&mut self, field: WindField) {
        self.wind_field = Some(field);
    }

    /// Drop the cached wind field; particles stop moving but keep aging.
    pub fn clear_wind_field(&mut self) {
        self.wind_field = None;
    }

    pub fn has_wind_field(&self) -> bool {
        self.wind_field.is_some()
    }

    /// Recreate the surface and respawn the whole pool for a new viewport.
    /// The wind field is dropped; it was projected for the old viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.wind_field = None;

        if viewport.is_empty() {
            self.surface = None;
            self.particles.clear();
            return;
        }

        // Respawn to the device-class size, not the current pool length: a
        // system created before the view was ready has an empty pool.
        self.surface = Pixmap::new(viewport.width, viewport.height);
        self.particles = (0..self.pool_size)
            .map(|_| spawn(&mut self.rng, viewport, &self.config))
            .collect();
    }

    /// One simulation tick: fade the trail, then age/advect/respawn every
    /// particle and stroke the moved segments.
    pub fn step(&mut self) -> FieldResult<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        if self.particles.is_empty() {
            return Ok(());
        }

        // Fade first so the previous frame's trails recede. Multiplying all
        // four channels is the correct fade in premultiplied space.
        let fade = self.config.fade;
        for byte in surface.data_mut() {
            *byte = (*byte as f32 * fade) as u8;
        }

        let mut segments: Vec<(f32, f32, f32, f32, f32)> = Vec::new();

        for particle in &mut self.particles {
            particle.age += 1;

            let expired = particle.age > particle.max_age;
            let escaped = !self.viewport.contains(particle.x, particle.y);
            if expired || escaped {
                *particle = spawn(&mut self.rng, self.viewport, &self.config);
                particle.age = 0;
                continue;
            }

            let wind = self
                .wind_field
                .as_ref()
                .and_then(|field| field.interpolate(particle.x, particle.y));

            let Some(wind) = wind else {
                // No station in range: the particle holds still this tick
                // but is not discarded.
                particle.prev_x = particle.x;
                particle.prev_y = particle.y;
                continue;
            };

            let new_x = particle.x + wind.u * self.config.speed_factor;
            let new_y = particle.y + wind.v * self.config.speed_factor;
            if !new_x.is_finite() || !new_y.is_finite() {
                return Err(FieldError::Simulation(format!(
                    "non-finite particle position from wind ({}, {})",
                    wind.u, wind.v
                )));
            }

            particle.prev_x = particle.x;
            particle.prev_y = particle.y;
            particle.x = new_x;
            particle.y = new_y;

            segments.push((particle.prev_x, particle.prev_y, new_x, new_y, wind.speed));
        }

        let mut stroke = Stroke::default();
        stroke.width = self.config.trail_width;
        stroke.line_cap = LineCap::Round;

        for (x0, y0, x1, y1, speed) in segments {
            let color = self.scale.color_at(speed);

            let mut paint = Paint::default();
            paint.set_color_rgba8(color.r, color.g, color.b, color.a);
            paint.anti_alias = true;
            // Additive: overlapping trails brighten rather than overwrite.
            paint.blend_mode = BlendMode::Plus;

            let mut pb = PathBuilder::new();
            pb.move_to(x0, y0);
            pb.line_to(x1, y1);
            if let Some(path) = pb.finish() {
                surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }

        Ok(())
    }

    /// Clear the trail surface to fully transparent.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// Straight-alpha RGBA copy of the trail surface for the host to
    /// composite. A surfaceless system returns an all-transparent buffer.
    pub fn trail_rgba(&self) -> Vec<u8> {
        match &self.surface {
            Some(surface) => {
                let mut out = Vec::with_capacity(surface.data().len());
                for pixel in surface.pixels() {
                    let c = pixel.demultiply();
                    out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
                }
                out
            }
            None => vec![0; self.viewport.rgba_len()],
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

/// Spawn a particle at a random in-bounds position with a random initial
/// age offset, so a fresh pool does not expire in one synchronized pulse.
fn spawn(rng: &mut SmallRng, viewport: Viewport, config: &ParticleConfig) -> Particle {
    let x = rng.gen_range(0.0..viewport.width as f32);
    let y = rng.gen_range(0.0..viewport.height as f32);
    // Lifetime of at least one tick even if the environment sets both age
    // knobs to zero; gen_range panics on an empty range.
    let max_age = (config.age_min + rng.gen_range(0..config.age_span.max(1))).max(1);

    Particle {
        x,
        y,
        prev_x: x,
        prev_y: y,
        age: rng.gen_range(0..max_age),
        max_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(width: u32, height: u32) -> ParticleSystem {
        ParticleSystem::new(
            Viewport::new(width, height),
            DeviceClass::Constrained,
            ParticleConfig::default(),
            Some(7),
        )
    }

    #[test]
    fn test_pool_sized_by_device_class() {
        assert_eq!(system(100, 100).particles().len(), 400);
        let desktop = ParticleSystem::new(
            Viewport::new(100, 100),
            DeviceClass::Desktop,
            ParticleConfig::default(),
            Some(7),
        );
        assert_eq!(desktop.particles().len(), 800);
    }

    #[test]
    fn test_zero_viewport_is_inert() {
        let mut sys = system(0, 0);
        assert!(sys.particles().is_empty());
        assert!(sys.step().is_ok());
        assert!(sys.trail_rgba().is_empty());
    }

    #[test]
    fn test_resize_restores_device_class_pool() {
        // Created before the view is ready: no surface, no particles.
        let mut sys = system(0, 0);
        assert!(sys.particles().is_empty());

        sys.resize(Viewport::new(256, 256));
        assert_eq!(sys.particles().len(), DeviceClass::Constrained.pool_size());
        assert!(sys.step().is_ok());
    }

    #[test]
    fn test_zero_age_config_spawns_without_panicking() {
        let config = ParticleConfig {
            age_min: 0,
            age_span: 0,
            ..ParticleConfig::default()
        };
        let mut sys = ParticleSystem::new(
            Viewport::new(32, 32),
            DeviceClass::Constrained,
            config,
            Some(11),
        );
        for _ in 0..3 {
            sys.step().unwrap();
        }
        for p in sys.particles() {
            assert!(p.max_age >= 1);
        }
    }

    #[test]
    fn test_spawned_particles_start_in_bounds() {
        let sys = system(64, 32);
        for p in sys.particles() {
            assert!(p.x >= 0.0 && p.x < 64.0);
            assert!(p.y >= 0.0 && p.y < 32.0);
            assert!(p.age < p.max_age);
        }
    }

    #[test]
    fn test_expired_particle_respawns_next_tick() {
        let mut sys = system(100, 100);
        // Force every particle to the brink of expiry.
        let max_ages: Vec<u32> = sys.particles().iter().map(|p| p.max_age).collect();
        for (particle, max_age) in sys.particles.iter_mut().zip(max_ages) {
            particle.age = max_age;
        }

        sys.step().unwrap();

        for p in sys.particles() {
            assert!(p.age < p.max_age, "age {} not reset below {}", p.age, p.max_age);
        }
    }

    #[test]
    fn test_empty_wind_field_holds_particles_still() {
        let mut sys = system(100, 100);
        let before: Vec<(f32, f32, u32)> =
            sys.particles().iter().map(|p| (p.x, p.y, p.age)).collect();

        sys.step().unwrap();

        for (p, (x, y, age)) in sys.particles().iter().zip(before) {
            if p.age == 0 {
                // Respawned on schedule; a fresh position is expected.
                continue;
            }
            assert_eq!((p.x, p.y), (x, y), "particle moved without wind");
            assert_eq!(p.age, age + 1, "age did not advance");
        }
    }

    #[test]
    fn test_clear_leaves_transparent_trail() {
        let mut sys = system(16, 16);
        sys.clear();
        assert!(sys.trail_rgba().iter().all(|&b| b == 0));
    }
}
