//! Device RGB color type
//!
//! An 8-bit device triple is the identity of a palette entry and the unit
//! every input and output buffer is made of.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit device RGB triple.
///
/// Palette identity, deduplication and output are all defined on this type;
/// perceptual coordinates are derived from it with [`Lab::from`](crate::Lab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a new device color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a device color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as floats, the representation used on the working canvas.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Snap working-canvas values to the nearest device color.
    ///
    /// Each channel is clamped to 0..=255 and rounded half away from zero.
    /// Values pushed out of range by accumulated error saturate.
    ///
    /// # Example
    ///
    /// ```
    /// use mapart_dither::Rgb;
    ///
    /// assert_eq!(Rgb::from_f32_saturating([-12.0, 127.5, 300.0]), Rgb::new(0, 128, 255));
    /// ```
    #[inline]
    pub fn from_f32_saturating(channels: [f32; 3]) -> Self {
        let snap = |v: f32| v.clamp(0.0, 255.0).round() as u8;
        Self::new(snap(channels[0]), snap(channels[1]), snap(channels[2]))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    /// Formats as an upper-case `#RRGGBB` hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a device color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapart_dither::Rgb;
    ///
    /// let carpet: Rgb = "#DC0000".parse().unwrap();
    /// assert_eq!(carpet, Rgb::new(0xDC, 0, 0));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidHex(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits[..] {
            // Shorthand: each digit doubles (0xF -> 0xFF)
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(
                (r1 << 4) | r0,
                (g1 << 4) | g0,
                (b1 << 4) | b0,
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
