//! Canvas geometry and source preparation.
//!
//! A map grid is `map_width × map_height` tiles of [`TILE_SIZE`] pixels, so
//! the canvas the engine dithers is always an exact multiple of 128 on both
//! sides. [`GridConfig`] validates the grid; a [`Resize`] implementation
//! brings an arbitrary source to exactly that size.

mod grid;
mod resize;

pub use grid::{GridAxis, GridConfig, MAX_GRID, TILE_SIZE};
pub use resize::{NearestFit, Resize, ResizeError};
