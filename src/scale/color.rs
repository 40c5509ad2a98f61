//! Color values for SVG fills.

use std::fmt;

use serde::Serialize;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Build from a packed 0xRRGGBB value.
    pub const fn from_hex(v: u32) -> Self {
        Self { r: ((v >> 16) & 0xff) as u8, g: ((v >> 8) & 0xff) as u8, b: (v & 0xff) as u8 }
    }

    /// Build from floating channels, rounding and clamping into [0, 255].
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        let channel = |c: f64| if c.is_nan() { 0 } else { c.round().clamp(0.0, 255.0) as u8 };
        Self { r: channel(r), g: channel(g), b: channel(b) }
    }

    /// Channels as floats, for interpolation.
    #[inline]
    pub(crate) fn channels(self) -> [f64; 3] { [self.r as f64, self.g as f64, self.b as f64] }

    /// Straight-line blend, `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let [r1, g1, b1] = self.channels();
        let [r2, g2, b2] = other.channels();
        Rgb::from_channels(r1 + (r2 - r1) * t, g1 + (g2 - g1) * t, b1 + (b2 - b1) * t)
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
