//! Common types shared across the weather field overlay crates.

pub mod error;
pub mod forecast;
pub mod observation;
pub mod viewport;

pub use error::{FieldError, FieldResult};
pub use forecast::{ForecastGrid, ForecastHour, ForecastPoint};
pub use observation::{Observation, ScalarKind};
pub use viewport::{project_scalar_samples, PixelPos, PixelSample, Projection, Viewport};
