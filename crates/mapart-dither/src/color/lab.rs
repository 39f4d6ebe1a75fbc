//! CIE L\*a\*b\* perceptual color space
//!
//! Lab is designed so that Euclidean distance approximates perceived color
//! difference. The conversion follows the standard pipeline
//! sRGB → linear RGB → CIE XYZ → CIE Lab, referenced to the D65 white point.

use super::linear_rgb::LinearRgb;
use super::rgb::Rgb;

/// D65 reference white in XYZ (Y normalized to 1.0).
const D65_WHITE: [f32; 3] = [0.950_47, 1.0, 1.088_83];

/// CIE epsilon, (6/29)^3.
const EPSILON: f32 = 216.0 / 24389.0;

/// CIE kappa, (29/3)^3.
const KAPPA: f32 = 24389.0 / 27.0;

/// A color in CIE L\*a\*b\* space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f32,
    /// Green-red axis
    pub a: f32,
    /// Blue-yellow axis
    pub b: f32,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance (CIE76 ΔE squared).
    ///
    /// Ordering by squared distance is identical to ordering by distance,
    /// so matching never takes the square root.
    ///
    /// # Example
    ///
    /// ```
    /// use mapart_dither::Lab;
    ///
    /// let white = Lab::new(100.0, 0.0, 0.0);
    /// let black = Lab::new(0.0, 0.0, 0.0);
    /// assert_eq!(white.distance_squared(black), 10_000.0);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Lab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance (CIE76 ΔE).
    #[inline]
    pub fn distance(self, other: Lab) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

impl From<LinearRgb> for Lab {
    /// Convert linear sRGB (D65 primaries) through XYZ to Lab.
    fn from(rgb: LinearRgb) -> Self {
        let x = 0.412_456_4 * rgb.r + 0.357_576_1 * rgb.g + 0.180_437_5 * rgb.b;
        let y = 0.212_672_9 * rgb.r + 0.715_152_2 * rgb.g + 0.072_175_0 * rgb.b;
        let z = 0.019_333_9 * rgb.r + 0.119_192_0 * rgb.g + 0.950_304_1 * rgb.b;

        let fx = lab_f(x / D65_WHITE[0]);
        let fy = lab_f(y / D65_WHITE[1]);
        let fz = lab_f(z / D65_WHITE[2]);

        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Rgb> for Lab {
    /// The perceptual conversion used for every matching decision.
    ///
    /// Pure and total: every 8-bit triple has a Lab coordinate.
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Lab::from(LinearRgb::from(rgb))
    }
}
