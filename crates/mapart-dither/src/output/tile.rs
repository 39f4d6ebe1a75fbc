//! Borrowed tile view.

use crate::color::Rgb;
use crate::preprocess::TILE_SIZE;

use super::buffer::RgbBuffer;

/// A 128×128 window into a dithered canvas.
///
/// Tiles carry no pixel storage of their own. Coordinates passed to
/// [`pixel`](Self::pixel) and [`row`](Self::row) are local to the tile.
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    source: &'a RgbBuffer,
    tx: usize,
    ty: usize,
    index: usize,
}

impl<'a> Tile<'a> {
    pub(crate) fn new(source: &'a RgbBuffer, tx: usize, ty: usize, index: usize) -> Self {
        Self {
            source,
            tx,
            ty,
            index,
        }
    }

    /// Column in the grid, `0..map_width`.
    #[inline]
    pub fn tx(&self) -> usize {
        self.tx
    }

    /// Row in the grid, `0..map_height`.
    #[inline]
    pub fn ty(&self) -> usize {
        self.ty
    }

    /// Row-major position: `ty * map_width + tx`.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Top-left corner in canvas coordinates.
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        (self.tx * TILE_SIZE, self.ty * TILE_SIZE)
    }

    /// Pixel at tile-local `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < TILE_SIZE && y < TILE_SIZE, "({x}, {y}) outside tile");
        let (ox, oy) = self.origin();
        self.source.pixel(ox + x, oy + y)
    }

    /// Bytes of tile-local row `y`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < TILE_SIZE, "row {y} outside tile");
        let (ox, oy) = self.origin();
        &self.source.row(oy + y)[ox * 3..(ox + TILE_SIZE) * 3]
    }

    /// Copy the tile into its own buffer.
    pub fn to_buffer(&self) -> RgbBuffer {
        let (ox, oy) = self.origin();
        self.source.crop(ox, oy, TILE_SIZE, TILE_SIZE)
    }
}
