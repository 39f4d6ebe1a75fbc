//! Color types and conversion utilities
//!
//! This module provides type-safe color handling with a compile-time
//! distinction between device colors and the spaces derived from them.
//!
//! # Color Spaces
//!
//! - **Rgb**: 8-bit device triple. Used for input, output and palette identity.
//! - **LinearRgb**: Linear light intensity, the step between device RGB and XYZ.
//! - **Lab**: CIE L\*a\*b\* (D65). The only space palette matching runs in.
//!
//! # Example
//!
//! ```
//! use mapart_dither::{Lab, Rgb};
//!
//! let orange = Rgb::new(255, 128, 0);
//! let lab = Lab::from(orange);
//! assert!(lab.l > 60.0 && lab.a > 0.0 && lab.b > 0.0);
//! ```

mod lab;
mod linear_rgb;
mod lut;
mod rgb;

pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use rgb::Rgb;
