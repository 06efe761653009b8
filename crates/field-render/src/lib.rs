//! Rendering engines for the weather field overlays.
//!
//! Two engines share this crate: the scalar field rasterizer (`heatmap`),
//! which fills an RGBA buffer with inverse-distance-weighted temperatures,
//! and the wind particle system (`wind` + `particles`), which advects a
//! particle pool through an interpolated vector field and draws fading
//! additive trails. Both color through the piecewise-linear stop tables in
//! `scale`, the only bit-exact visual contract of the workspace.

pub mod color;
pub mod heatmap;
pub mod particles;
pub mod png;
pub mod scale;
pub mod wind;

pub use color::Rgba;
pub use heatmap::{fill_scalar_field, interpolate_scalar, HeatmapConfig};
pub use particles::{DeviceClass, ParticleConfig, ParticleSystem};
pub use scale::{temperature_scale, wind_speed_scale, ColorScale, ColorStop};
pub use wind::{WindField, WindFieldConfig, WindVector};
