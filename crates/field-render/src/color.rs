//! RGBA color value and channel-wise linear interpolation.

/// Color value in straight (non-premultiplied) RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Replace the alpha channel, keeping the color channels.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Linear channel-wise interpolation. `t` is clamped to [0, 1] and each
    /// channel is rounded, so the result never leaves the range spanned by
    /// the two endpoints. Truncation would undershoot: blending two 255
    /// channels lands just below 255.0 in f32.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let t_inv = 1.0 - t;

        Rgba::new(
            (self.r as f32 * t_inv + other.r as f32 * t).round() as u8,
            (self.g as f32 * t_inv + other.g as f32 * t).round() as u8,
            (self.b as f32 * t_inv + other.b as f32 * t).round() as u8,
            (self.a as f32 * t_inv + other.a as f32 * t).round() as u8,
        )
    }

    /// Write the color into an RGBA byte buffer at the given pixel offset.
    #[inline]
    pub fn write_to(self, pixels: &mut [u8], offset: usize) {
        pixels[offset] = self.r;
        pixels[offset + 1] = self.g;
        pixels[offset + 2] = self.b;
        pixels[offset + 3] = self.a;
    }
}
