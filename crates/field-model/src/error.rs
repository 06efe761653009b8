//! Error types for the weather field overlay crates.
//!
//! The rendering layer itself is deliberately forgiving: missing data, an
//! empty viewport, or out-of-range samples degrade to no-ops rather than
//! errors. The variants below cover the cases that genuinely can fail:
//! configuration validation, image encoding, a degenerate simulation tick,
//! and fixture loading.

use thiserror::Error;

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;

/// Primary error type for the field overlay crates.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("simulation error: {0}")]
    Simulation(String),

    #[error("fixture error: {0}")]
    Fixture(String),
}

impl From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(err: serde_json::Error) -> Self {
        FieldError::Fixture(format!("JSON error: {}", err))
    }
}
