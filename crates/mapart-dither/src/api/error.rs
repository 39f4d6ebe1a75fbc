//! Unified error type for the mapart-dither public API.

use thiserror::Error;

use crate::palette::PaletteError;
use crate::preprocess::{GridAxis, ResizeError};

/// Unified error type for the mapart-dither public API.
///
/// Every variant except [`Cancelled`](DitherError::Cancelled) is detected
/// before any pixel is touched. `Cancelled` is a distinct outcome rather than
/// a fault: the caller asked for it.
///
/// # Example
///
/// ```
/// use mapart_dither::{DitherError, Palette};
///
/// fn load() -> Result<Palette, DitherError> {
///     let palette = Palette::from_hex(&["#000000", "#FFFFFF"])?;
///     Ok(palette)
/// }
/// # assert_eq!(load().unwrap().len(), 2);
/// ```
#[derive(Debug, Error)]
pub enum DitherError {
    /// Palette could not be built
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// A canvas or buffer with a zero side
    #[error("invalid canvas dimensions {width}x{height}: both sides must be positive")]
    InvalidCanvasDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Raw pixel data does not match its declared size
    #[error("a {width}x{height} RGB buffer needs {expected} bytes, got {actual}")]
    InvalidBufferLength {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
        /// `width * height * 3`
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// A buffer is not the size the operation requires
    #[error(
        "expected {expected_width}x{expected_height} pixels, got {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        /// Required width
        expected_width: usize,
        /// Required height
        expected_height: usize,
        /// Width supplied
        actual_width: usize,
        /// Height supplied
        actual_height: usize,
    },

    /// Map grid outside 1..=8 tiles on one axis
    #[error("unsupported {axis} {value}: must be between 1 and 8")]
    UnsupportedGridSize {
        /// Offending axis
        axis: GridAxis,
        /// Offending tile count
        value: usize,
    },

    /// The resampling collaborator failed
    #[error("resize failed: {0}")]
    Resize(#[source] ResizeError),

    /// The run was stopped through its cancel flag
    #[error("cancelled after {rows_completed} of {total_rows} rows")]
    Cancelled {
        /// Rows finished before the flag was seen
        rows_completed: usize,
        /// Rows in the canvas
        total_rows: usize,
    },
}

impl DitherError {
    /// True for [`DitherError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DitherError::Cancelled { .. })
    }
}
