//! Piecewise-linear color scales over fixed breakpoint tables.
//!
//! The two stop tables below are the only bit-exact visual contract of the
//! workspace: the temperature table spans −35 °C to +40 °C in 15 stops with
//! 0 °C anchored at pure white, the wind table spans 0 to 25 m/s in 7 stops
//! and carries per-stop alpha so light winds fade out. Changing any entry
//! changes every rendered frame, so they live here as `const` data and
//! nowhere else.

use crate::color::Rgba;

/// One breakpoint of a color scale.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub value: f32,
    pub color: Rgba,
}

const fn stop(value: f32, color: Rgba) -> ColorStop {
    ColorStop { value, color }
}

/// Temperature breakpoints in °C. Violet through blue into white at 0 °C,
/// then yellow through deep red.
pub const TEMPERATURE_STOPS: [ColorStop; 15] = [
    stop(-35.0, Rgba::opaque(84, 0, 130)),
    stop(-25.0, Rgba::opaque(40, 0, 160)),
    stop(-20.0, Rgba::opaque(26, 70, 200)),
    stop(-15.0, Rgba::opaque(25, 118, 210)),
    stop(-10.0, Rgba::opaque(66, 165, 245)),
    stop(-5.0, Rgba::opaque(160, 210, 250)),
    stop(0.0, Rgba::opaque(255, 255, 255)),
    stop(5.0, Rgba::opaque(255, 240, 170)),
    stop(10.0, Rgba::opaque(255, 215, 110)),
    stop(15.0, Rgba::opaque(255, 180, 70)),
    stop(20.0, Rgba::opaque(250, 140, 55)),
    stop(25.0, Rgba::opaque(240, 95, 40)),
    stop(30.0, Rgba::opaque(220, 55, 30)),
    stop(35.0, Rgba::opaque(190, 25, 20)),
    stop(40.0, Rgba::opaque(150, 0, 10)),
];

/// Wind speed breakpoints in m/s, with alpha rising alongside the speed so
/// calm-air trails stay faint.
pub const WIND_SPEED_STOPS: [ColorStop; 7] = [
    stop(0.0, Rgba::new(220, 220, 220, 30)),
    stop(2.0, Rgba::new(120, 180, 220, 90)),
    stop(5.0, Rgba::new(60, 170, 190, 140)),
    stop(10.0, Rgba::new(230, 210, 80, 180)),
    stop(15.0, Rgba::new(240, 150, 50, 210)),
    stop(20.0, Rgba::new(230, 80, 40, 235)),
    stop(25.0, Rgba::new(180, 20, 20, 255)),
];

/// A scalar-to-color mapping over an ordered breakpoint table.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [ColorStop],
}

impl ColorScale {
    /// Build a scale over a static stop table. The table must be ordered by
    /// value and non-empty; both tables in this module are.
    pub const fn new(stops: &'static [ColorStop]) -> Self {
        Self { stops }
    }

    /// Interpolated color for a value. Values at or below the lowest stop
    /// clamp to its color, values at or above the highest stop clamp to its
    /// color; in between, the bracketing pair is interpolated channel-wise
    /// with `t = (value - t0) / (t1 - t0)`.
    pub fn color_at(&self, value: f32) -> Rgba {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if value <= hi.value {
                let t = (value - lo.value) / (hi.value - lo.value);
                return lo.color.lerp(hi.color, t);
            }
        }

        // Unreachable for an ordered table, but keep the clamp semantics.
        last.color
    }

    /// Interpolated color with the alpha channel overridden. The heatmap
    /// path uses this: its opacity comes from configuration, not the table.
    pub fn color_with_alpha(&self, value: f32, alpha: u8) -> Rgba {
        self.color_at(value).with_alpha(alpha)
    }

    pub fn stops(&self) -> &'static [ColorStop] {
        self.stops
    }
}

/// The temperature scale, −35 °C to +40 °C.
pub const fn temperature_scale() -> ColorScale {
    ColorScale::new(&TEMPERATURE_STOPS)
}

/// The wind speed scale, 0 to 25 m/s.
pub const fn wind_speed_scale() -> ColorScale {
    ColorScale::new(&WIND_SPEED_STOPS)
}
