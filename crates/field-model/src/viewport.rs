//! Viewport dimensions and the projection seam to the host map widget.

use serde::{Deserialize, Serialize};

use crate::observation::{Observation, ScalarKind};

/// Rendered size of the map container in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-size viewport; every render path treats it as a no-op.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte length of an RGBA buffer covering this viewport.
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// True when the pixel position lies inside the viewport.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }
}

/// A position in current-viewport pixel space. May lie outside the viewport:
/// stations slightly off-screen still influence edge pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPos {
    pub x: f32,
    pub y: f32,
}

impl PixelPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A projected point sample: pixel position plus one scalar value.
///
/// Ephemeral by design: produced fresh on every render call by projecting
/// observations through the current projection, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub x: f32,
    pub y: f32,
    pub value: f32,
}

impl PixelSample {
    pub fn new(x: f32, y: f32, value: f32) -> Self {
        Self { x, y, value }
    }
}

/// Conversion from geographic coordinates to current-viewport pixel space.
///
/// Implemented by the host map widget. The mapping changes whenever the view
/// pans or zooms, so implementations must always reflect the current
/// viewport and callers must re-project after every viewport change. A
/// stale projection produces visibly wrong overlays.
pub trait Projection {
    fn project(&self, longitude: f64, latitude: f64) -> PixelPos;
}

/// Project one scalar field of each observation into pixel samples.
///
/// Observations missing the requested field are skipped; they remain valid
/// for other fields.
pub fn project_scalar_samples(
    observations: &[Observation],
    kind: ScalarKind,
    projection: &dyn Projection,
) -> Vec<PixelSample> {
    observations
        .iter()
        .filter_map(|obs| {
            let value = obs.scalar(kind)?;
            let pos = projection.project(obs.longitude, obs.latitude);
            Some(PixelSample::new(pos.x, pos.y, value as f32))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    struct FixedProjection;

    impl Projection for FixedProjection {
        fn project(&self, longitude: f64, latitude: f64) -> PixelPos {
            // 10 px per degree, origin at (20°E, 70°N), y growing south.
            PixelPos::new(
                ((longitude - 20.0) * 10.0) as f32,
                ((70.0 - latitude) * 10.0) as f32,
            )
        }
    }

    #[test]
    fn test_viewport_guards() {
        assert!(Viewport::empty().is_empty());
        assert!(Viewport::new(0, 512).is_empty());
        assert!(!Viewport::new(512, 512).is_empty());
        assert_eq!(Viewport::new(4, 2).rgba_len(), 32);
    }

    #[test]
    fn test_project_scalar_samples_skips_missing_field() {
        let mut with_temp = Observation::new("a", 65.0, 25.0, Utc::now());
        with_temp.temperature = Some(-10.0);
        let without_temp = Observation::new("b", 64.0, 26.0, Utc::now());

        let samples = project_scalar_samples(
            &[with_temp, without_temp],
            ScalarKind::Temperature,
            &FixedProjection,
        );

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].x, 50.0);
        assert_eq!(samples[0].y, 50.0);
        assert_eq!(samples[0].value, -10.0);
    }
}
