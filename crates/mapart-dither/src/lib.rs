//! mapart-dither: palette-restricted dithering for tiled map art
//!
//! This library converts a decoded image into one drawn only from a small,
//! fixed palette, using error diffusion with perceptual (CIE Lab) color
//! matching, and lays the result out over a grid of 128×128 map tiles.
//!
//! # Quick Start
//!
//! The [`CanvasCompositor`] builder is the primary entry point:
//!
//! ```
//! use mapart_dither::{CanvasCompositor, GridConfig, Palette, RgbBuffer, Rgb};
//!
//! let palette = Palette::from_hex(&["#1D1D21", "#F9FFFE", "#B02E26", "#3C44AA"]).unwrap();
//! let source = RgbBuffer::from_fn(500, 240, |x, y| {
//!     Rgb::new((x / 2) as u8, y as u8, 128)
//! })
//! .unwrap();
//!
//! let grid = GridConfig::new(2, 1).unwrap();
//! let composite = CanvasCompositor::new(&palette).compose(&source, &grid).unwrap();
//!
//! for tile in composite.tiles() {
//!     assert_eq!(tile.to_buffer().dimensions(), (128, 128));
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! RgbBuffer (any size)
//!     |
//!     v
//! Resize                  (exact target size: 128·map_width × 128·map_height)
//!     |
//!     v
//! Canvas + ErrorBuffer    (f32 working values, full footprint)
//!     |
//!     v
//! DitherEngine            (one raster pass across every tile seam)
//!     |
//!     v
//! Composite -> Tiles      (row-major, index = ty·map_width + tx)
//! ```
//!
//! # Color Matching
//!
//! Each palette color is converted once to CIE L\*a\*b\* (D65) through
//! linear RGB and XYZ. Working pixels are snapped to 8 bits, converted the
//! same way, and matched by Euclidean distance; exact ties go to the
//! earliest palette entry. Error itself is diffused in device RGB units.
//!
//! # Error Diffusion
//!
//! The kernel is Floyd-Steinberg (7/16, 3/16, 5/16, 1/16) in strict raster
//! order. Unlike the textbook algorithm, every individual share is clamped
//! to ±[`DitherOptions::error_clamp`] (32 by default) before it is added,
//! so a sparse palette cannot build up runaway error across large flat
//! regions.
//!
//! # Concurrency
//!
//! A [`Palette`] is immutable and may be shared by reference across threads.
//! Each run owns its canvas and error buffer; output depends only on the
//! input, never on scheduling. Long runs report through a [`ProgressSink`]
//! and stop between rows when their [`CancelFlag`] is raised.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;


pub use api::{CanvasCompositor, DitherError};
pub use color::{Lab, LinearRgb, Rgb};
pub use dither::{
    CancelFlag, Canvas, DitherEngine, DitherOptions, ErrorBuffer, Kernel, ProgressEvent,
    ProgressSink, FLOYD_STEINBERG,
};
pub use output::{Composite, RgbBuffer, Tile};
pub use palette::{MatchCache, Palette, PaletteColor, PaletteError, ParseColorError};
pub use preprocess::{GridAxis, GridConfig, NearestFit, Resize, ResizeError, MAX_GRID, TILE_SIZE};
