//! Per-run memo of nearest-color lookups.

use std::collections::HashMap;

use super::palette::Palette;
use crate::color::Rgb;

/// Memoizes `Rgb -> palette index` for one dithering run.
///
/// Photographs repeat the same 8-bit triples heavily, and a Lab conversion
/// plus a full palette scan per pixel dominates the engine's cost. The cache
/// borrows the palette and is owned by a single run, so concurrent runs never
/// share it.
#[derive(Debug)]
pub struct MatchCache<'a> {
    palette: &'a Palette,
    memo: HashMap<Rgb, usize>,
}

impl<'a> MatchCache<'a> {
    /// Create an empty cache over `palette`.
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            memo: HashMap::new(),
        }
    }

    /// The palette this cache answers for.
    #[inline]
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Index of the nearest palette entry, computed at most once per color.
    #[inline]
    pub fn nearest_index(&mut self, pixel: Rgb) -> usize {
        let palette = self.palette;
        *self
            .memo
            .entry(pixel)
            .or_insert_with(|| palette.nearest_index(pixel))
    }

    /// Device color of the nearest palette entry.
    #[inline]
    pub fn nearest(&mut self, pixel: Rgb) -> Rgb {
        let idx = self.nearest_index(pixel);
        self.palette.color(idx)
    }

    /// Number of distinct colors looked up so far.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// True if nothing has been looked up yet.
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
