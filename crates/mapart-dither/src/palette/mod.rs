//! Palette types and nearest-color matching
//!
//! A [`Palette`] is an ordered, deduplicated set of device colors with their
//! CIE Lab coordinates precomputed. It is built once and shared read-only by
//! every dithering run.

mod cache;
mod error;
mod palette;

pub use cache::MatchCache;
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteColor};
