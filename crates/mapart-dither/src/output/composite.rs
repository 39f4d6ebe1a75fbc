//! Result of one compositor run.

use crate::preprocess::GridConfig;

use super::buffer::RgbBuffer;
use super::tile::Tile;

/// The full dithered canvas for a grid, plus optional comparison images.
///
/// Tiles are views into [`dithered`](Self::dithered), enumerated in
/// row-major order: `tx` varies fastest and `index = ty * map_width + tx`.
#[derive(Debug, Clone)]
pub struct Composite {
    dithered: RgbBuffer,
    original: Option<RgbBuffer>,
    quantized: Option<RgbBuffer>,
    grid: GridConfig,
}

impl Composite {
    pub(crate) fn new(
        dithered: RgbBuffer,
        original: Option<RgbBuffer>,
        quantized: Option<RgbBuffer>,
        grid: GridConfig,
    ) -> Self {
        Self {
            dithered,
            original,
            quantized,
            grid,
        }
    }

    /// The dithered canvas.
    #[inline]
    pub fn dithered(&self) -> &RgbBuffer {
        &self.dithered
    }

    /// Source after resizing, before dithering. Present in comparison mode.
    #[inline]
    pub fn original(&self) -> Option<&RgbBuffer> {
        self.original.as_ref()
    }

    /// Nearest-color map without diffusion. Present in comparison mode.
    #[inline]
    pub fn quantized(&self) -> Option<&RgbBuffer> {
        self.quantized.as_ref()
    }

    /// The grid this composite was laid out for.
    #[inline]
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Take ownership of the dithered canvas.
    pub fn into_dithered(self) -> RgbBuffer {
        self.dithered
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.grid.tile_count()
    }

    /// The tile at grid position `(tx, ty)`, if inside the grid.
    pub fn tile(&self, tx: usize, ty: usize) -> Option<Tile<'_>> {
        let map_width = self.grid.map_width();
        if tx >= map_width || ty >= self.grid.map_height() {
            return None;
        }
        Some(Tile::new(&self.dithered, tx, ty, ty * map_width + tx))
    }

    /// Every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile<'_>> + '_ {
        let map_width = self.grid.map_width();
        (0..self.tile_count())
            .map(move |index| Tile::new(&self.dithered, index % map_width, index / map_width, index))
    }

    /// Every tile copied into its own 128×128 buffer, row-major.
    pub fn tile_buffers(&self) -> Vec<RgbBuffer> {
        self.tiles().map(|t| t.to_buffer()).collect()
    }
}
