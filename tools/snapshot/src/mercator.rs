//! Web Mercator projection fitted to a viewport.
//!
//! The live system gets its projection from the host map widget; this tool
//! has no widget, so it ships the one projection a web map would use,
//! scaled so a geographic window fills the target viewport.

use field_model::{PixelPos, Projection, Viewport};

/// Web Mercator over a fixed geographic window.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    viewport: Viewport,
    x0: f64,
    y0: f64,
    scale_x: f64,
    scale_y: f64,
}

impl WebMercator {
    /// Fit a lon/lat window onto the viewport. The aspect ratios need not
    /// match; each axis is scaled independently, as a map widget resizing
    /// its container would.
    pub fn fit(window: (f64, f64, f64, f64), viewport: Viewport) -> Self {
        let (min_lon, min_lat, max_lon, max_lat) = window;
        let x0 = mercator_x(min_lon);
        let x1 = mercator_x(max_lon);
        // Northern edge has the smaller mercator y once negated for screen
        // space.
        let y0 = -mercator_y(max_lat);
        let y1 = -mercator_y(min_lat);

        Self {
            viewport,
            x0,
            y0,
            scale_x: viewport.width as f64 / (x1 - x0),
            scale_y: viewport.height as f64 / (y1 - y0),
        }
    }
}

impl Projection for WebMercator {
    fn project(&self, longitude: f64, latitude: f64) -> PixelPos {
        let x = (mercator_x(longitude) - self.x0) * self.scale_x;
        let y = (-mercator_y(latitude) - self.y0) * self.scale_y;
        PixelPos::new(x as f32, y as f32)
    }
}

fn mercator_x(longitude: f64) -> f64 {
    longitude.to_radians()
}

fn mercator_y(latitude: f64) -> f64 {
    let lat = latitude.to_radians();
    (lat / 2.0 + std::f64::consts::FRAC_PI_4).tan().ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: (f64, f64, f64, f64) = (20.0, 59.8, 31.5, 70.1);

    #[test]
    fn test_window_corners_hit_viewport_corners() {
        let viewport = Viewport::new(512, 768);
        let proj = WebMercator::fit(WINDOW, viewport);

        let nw = proj.project(20.0, 70.1);
        assert!(nw.x.abs() < 1e-3 && nw.y.abs() < 1e-3);

        let se = proj.project(31.5, 59.8);
        assert!((se.x - 512.0).abs() < 1e-3);
        assert!((se.y - 768.0).abs() < 1e-3);
    }

    #[test]
    fn test_north_is_up() {
        let proj = WebMercator::fit(WINDOW, Viewport::new(512, 512));
        let north = proj.project(25.0, 69.0);
        let south = proj.project(25.0, 61.0);
        assert!(north.y < south.y);
    }

    #[test]
    fn test_mercator_stretches_toward_poles() {
        let proj = WebMercator::fit(WINDOW, Viewport::new(512, 512));
        // One degree of latitude covers more pixels in the north than in
        // the south under Mercator.
        let d_north = proj.project(25.0, 69.0).y - proj.project(25.0, 70.0).y;
        let d_south = proj.project(25.0, 60.0).y - proj.project(25.0, 61.0).y;
        assert!(d_north > d_south);
    }
}
