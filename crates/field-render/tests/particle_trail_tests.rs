//! Trail-surface tests for the wind particle system.

use chrono::Utc;
use field_model::{Observation, PixelPos, Projection, Viewport};
use field_render::{
    DeviceClass, ParticleConfig, ParticleSystem, WindField, WindFieldConfig,
};

struct IdentityProjection;

impl Projection for IdentityProjection {
    fn project(&self, longitude: f64, latitude: f64) -> PixelPos {
        PixelPos::new(longitude as f32, latitude as f32)
    }
}

fn windy_station(x: f64, y: f64) -> Observation {
    let mut obs = Observation::new("w1", y, x, Utc::now());
    obs.wind_speed = Some(8.0);
    obs.wind_direction = Some(270.0);
    obs
}

fn system_with_wind() -> ParticleSystem {
    let viewport = Viewport::new(64, 64);
    let mut sys = ParticleSystem::new(
        viewport,
        DeviceClass::Constrained,
        ParticleConfig::default(),
        Some(42),
    );
    // One station in the middle of the viewport covers everything at the
    // default 400 px influence radius.
    sys.set_wind_field(WindField::from_observations(
        &[windy_station(32.0, 32.0)],
        &IdentityProjection,
        WindFieldConfig::default(),
    ));
    sys
}

#[test]
fn test_steps_leave_visible_trails() {
    let mut sys = system_with_wind();
    for _ in 0..5 {
        sys.step().unwrap();
    }

    let trail = sys.trail_rgba();
    assert_eq!(trail.len(), 64 * 64 * 4);
    let lit = trail.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(lit > 0, "no pixel received a trail segment");
}

#[test]
fn test_trails_fade_without_wind() {
    let mut sys = system_with_wind();
    for _ in 0..5 {
        sys.step().unwrap();
    }

    // Remove the wind: nothing new is drawn, so the per-tick fade must
    // drive every channel to zero.
    sys.clear_wind_field();
    for _ in 0..200 {
        sys.step().unwrap();
    }

    assert!(
        sys.trail_rgba().iter().all(|&b| b == 0),
        "trail did not fade out"
    );
}

#[test]
fn test_clear_resets_trail_to_transparent() {
    let mut sys = system_with_wind();
    for _ in 0..5 {
        sys.step().unwrap();
    }
    sys.clear();
    assert!(sys.trail_rgba().iter().all(|&b| b == 0));
}

#[test]
fn test_resize_drops_stale_wind_field() {
    let mut sys = system_with_wind();
    assert!(sys.has_wind_field());

    sys.resize(Viewport::new(128, 32));

    // The old field was projected for the old viewport; it must be gone.
    assert!(!sys.has_wind_field());
    assert_eq!(sys.viewport(), Viewport::new(128, 32));
    assert_eq!(sys.trail_rgba().len(), 128 * 32 * 4);
    for p in sys.particles() {
        assert!(p.x < 128.0 && p.y < 32.0);
    }
}
