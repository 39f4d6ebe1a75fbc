//! Output types for the dithering pipeline.
//!
//! - [`RgbBuffer`]: owned 8-bit RGB raster, the unit every input and output
//!   crosses the crate boundary as
//! - [`Composite`]: the result of one compositor run, the full dithered
//!   canvas plus optional comparison buffers
//! - [`Tile`]: a borrowed 128×128 window into a composite

mod buffer;
mod composite;
mod tile;

pub use buffer::RgbBuffer;
pub use composite::Composite;
pub use tile::Tile;
