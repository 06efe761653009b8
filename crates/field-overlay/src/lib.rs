//! Overlay render drivers for the weather field engines.
//!
//! Two drivers share one behavioral contract: `ScalarOverlay` owns the
//! temperature heatmap buffer, `WindOverlay` owns the particle system and
//! its trail. Both bridge data updates, debounced viewport changes,
//! visibility toggles and the forecast/live mode switch into calls on the
//! engines in `field-render`, and both pause work the moment nobody can see
//! it.

pub mod config;
pub mod scalar;
pub mod schedule;
pub mod source;
pub mod state;
pub mod vector;

pub use config::OverlayConfig;
pub use scalar::ScalarOverlay;
pub use schedule::{Debouncer, FrameScheduler, ManualScheduler, ScheduleToken};
pub use source::{DataSource, RenderMode};
pub use state::{OverlayInputs, RunState};
pub use vector::WindOverlay;
