//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or invalid hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Character that is not a hexadecimal digit (signs included)
    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors left after deduplication
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Invalid hex color string at the given position
    #[error("invalid color at position {index}: {source}")]
    ParseColor {
        /// Position of the offending string in the input list
        index: usize,
        /// Underlying parse failure
        #[source]
        source: ParseColorError,
    },
}
