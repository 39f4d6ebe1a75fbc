//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! It is the intermediate step between device RGB and CIE XYZ.

use super::lut::srgb8_to_linear;
use super::rgb::Rgb;

/// A color in linear RGB color space.
///
/// Values represent light intensity proportional to physical light power,
/// in the range 0.0..=1.0 for colors decoded from 8-bit device triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for LinearRgb {
    /// Decode the sRGB transfer curve through the 256-entry lookup table.
    fn from(rgb: Rgb) -> Self {
        Self {
            r: srgb8_to_linear(rgb.r),
            g: srgb8_to_linear(rgb.g),
            b: srgb8_to_linear(rgb.b),
        }
    }
}
