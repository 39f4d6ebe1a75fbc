//! Map grid geometry.

use std::fmt;

use crate::api::DitherError;

/// Edge length of one map tile in pixels.
pub const TILE_SIZE: usize = 128;

/// Largest number of tiles along either axis.
pub const MAX_GRID: usize = 8;

/// Which side of the grid a size refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAxis {
    /// Horizontal tile count
    Width,
    /// Vertical tile count
    Height,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridAxis::Width => f.write_str("map width"),
            GridAxis::Height => f.write_str("map height"),
        }
    }
}

/// How many tiles the output spans, and whether to resize the source to fit.
///
/// # Example
///
/// ```
/// use mapart_dither::GridConfig;
///
/// let grid = GridConfig::new(3, 2).unwrap();
/// assert_eq!((grid.target_width(), grid.target_height()), (384, 256));
/// assert_eq!(grid.tile_count(), 6);
///
/// assert!(GridConfig::new(9, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    map_width: usize,
    map_height: usize,
    resize_to_target: bool,
}

impl GridConfig {
    /// A grid of `map_width × map_height` tiles that resizes its source.
    ///
    /// # Errors
    ///
    /// [`DitherError::UnsupportedGridSize`] if either count is outside
    /// `1..=8`.
    pub fn new(map_width: usize, map_height: usize) -> Result<Self, DitherError> {
        check_axis(GridAxis::Width, map_width)?;
        check_axis(GridAxis::Height, map_height)?;
        Ok(Self {
            map_width,
            map_height,
            resize_to_target: true,
        })
    }

    /// Whether the compositor resamples the source to the target size.
    ///
    /// When `false`, sources must already be exactly the target size.
    pub fn resize_to_target(mut self, resize: bool) -> Self {
        self.resize_to_target = resize;
        self
    }

    /// Tiles across.
    #[inline]
    pub fn map_width(&self) -> usize {
        self.map_width
    }

    /// Tiles down.
    #[inline]
    pub fn map_height(&self) -> usize {
        self.map_height
    }

    /// See [`resize_to_target`](Self::resize_to_target).
    #[inline]
    pub fn resizes(&self) -> bool {
        self.resize_to_target
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn target_width(&self) -> usize {
        self.map_width * TILE_SIZE
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn target_height(&self) -> usize {
        self.map_height * TILE_SIZE
    }

    /// Total tiles in the grid.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.map_width * self.map_height
    }
}

impl Default for GridConfig {
    /// A single resized tile.
    fn default() -> Self {
        Self {
            map_width: 1,
            map_height: 1,
            resize_to_target: true,
        }
    }
}

fn check_axis(axis: GridAxis, value: usize) -> Result<(), DitherError> {
    if (1..=MAX_GRID).contains(&value) {
        Ok(())
    } else {
        Err(DitherError::UnsupportedGridSize { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        assert!(GridConfig::new(1, 1).is_ok());
        assert!(GridConfig::new(8, 8).is_ok());
    }

    #[test]
    fn test_rejects_zero_and_oversize_naming_axis() {
        assert!(matches!(
            GridConfig::new(0, 3),
            Err(DitherError::UnsupportedGridSize {
                axis: GridAxis::Width,
                value: 0
            })
        ));
        assert!(matches!(
            GridConfig::new(2, 9),
            Err(DitherError::UnsupportedGridSize {
                axis: GridAxis::Height,
                value: 9
            })
        ));
    }

    #[test]
    fn test_target_dimensions() {
        let grid = GridConfig::new(2, 1).unwrap().resize_to_target(false);
        assert_eq!(grid.target_width(), 256);
        assert_eq!(grid.target_height(), 128);
        assert_eq!(grid.tile_count(), 2);
        assert!(!grid.resizes());
    }

    #[test]
    fn test_default_is_single_tile() {
        let grid = GridConfig::default();
        assert_eq!(grid, GridConfig::new(1, 1).unwrap());
        assert!(grid.resizes());
    }
}
