//! Shared test utilities for the weather field overlay workspace.
//!
//! This crate provides common testing infrastructure:
//! - Synthetic station and forecast generators with predictable patterns
//! - A linear test projection standing in for the host map widget
//! - Buffer assertion helpers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod projection;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use projection::*;

/// Assert that an RGBA buffer is fully transparent (every byte zero).
///
/// Panics with the first offending pixel index, which locates the leak
/// faster than a plain `assert!(all zero)`.
pub fn assert_fully_transparent(pixels: &[u8]) {
    if let Some(pos) = pixels.iter().position(|&b| b != 0) {
        panic!(
            "buffer not transparent: byte {} of pixel {} is {}",
            pos % 4,
            pos / 4,
            pixels[pos]
        );
    }
}
