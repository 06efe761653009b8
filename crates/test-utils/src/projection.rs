//! A linear test projection standing in for the host map widget.

use field_model::{PixelPos, Projection, Viewport};

use crate::generators::REGION;

/// Linear lon/lat to pixel mapping over a fixed geographic window.
///
/// Not a real map projection; it exists so tests can predict exactly where
/// a station lands. Pan and zoom are simulated by changing the window.
#[derive(Debug, Clone, Copy)]
pub struct LinearProjection {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
    pub viewport: Viewport,
}

impl LinearProjection {
    pub fn new(window: (f64, f64, f64, f64), viewport: Viewport) -> Self {
        let (min_lon, min_lat, max_lon, max_lat) = window;
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
            viewport,
        }
    }

    /// The generators' Finland-like region mapped onto a viewport.
    pub fn over_region(viewport: Viewport) -> Self {
        Self::new(REGION, viewport)
    }
}

impl Projection for LinearProjection {
    fn project(&self, longitude: f64, latitude: f64) -> PixelPos {
        let fx = (longitude - self.min_lon) / (self.max_lon - self.min_lon);
        // Screen y grows downward; the top row is the northern edge.
        let fy = (self.max_lat - latitude) / (self.max_lat - self.min_lat);
        PixelPos::new(
            (fx * self.viewport.width as f64) as f32,
            (fy * self.viewport.height as f64) as f32,
        )
    }
}
