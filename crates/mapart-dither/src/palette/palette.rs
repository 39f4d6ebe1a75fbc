//! Palette struct with precomputed Lab coordinates and nearest-color matching.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::{Lab, Rgb};

/// One palette entry: a device color and its Lab coordinates.
///
/// The Lab triple is computed once when the entry is created and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColor {
    rgb: Rgb,
    lab: Lab,
}

impl PaletteColor {
    /// Create an entry, converting `rgb` to Lab.
    pub fn new(rgb: Rgb) -> Self {
        Self {
            rgb,
            lab: Lab::from(rgb),
        }
    }

    /// The device color written to the output.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The perceptual coordinates used for matching.
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }
}

/// An ordered set of device colors answering nearest-color queries.
///
/// Entries are unique by exact device RGB and keep the order in which they
/// were first seen. That order is the tie-break: when two entries are at
/// exactly the same distance from a query, the earlier one wins.
///
/// A `Palette` is immutable once built. Share it by reference across any
/// number of concurrent dithering runs.
///
/// # Example
///
/// ```
/// use mapart_dither::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE, Rgb::BLACK]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.duplicates_removed(), 1);
///
/// assert_eq!(palette.nearest(Rgb::new(30, 30, 30)).rgb(), Rgb::BLACK);
/// assert_eq!(palette.nearest(Rgb::new(220, 220, 220)).rgb(), Rgb::WHITE);
/// ```
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteColor>,
    duplicates_removed: usize,
}

impl Palette {
    /// Build a palette from device colors.
    ///
    /// Repeated colors are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        let mut seen = HashSet::with_capacity(colors.len());
        let entries: Vec<PaletteColor> = colors
            .iter()
            .filter(|&&c| seen.insert(c))
            .map(|&c| PaletteColor::new(c))
            .collect();

        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        Ok(Self {
            duplicates_removed: colors.len() - entries.len(),
            entries,
        })
    }

    /// Build a palette from hex color strings.
    ///
    /// Accepts the same forms as [`Rgb`]'s `FromStr`: `#RRGGBB`, `RRGGBB`,
    /// `#RGB` and `RGB`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] naming the first string that
    /// fails to parse, or [`PaletteError::EmptyPalette`] for an empty list.
    ///
    /// # Example
    ///
    /// ```
    /// use mapart_dither::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#B02E26"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// assert!(Palette::from_hex(&["#12345"]).is_err());
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.parse::<Rgb>()
                    .map_err(|source| PaletteError::ParseColor { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many input colors were dropped as exact repeats.
    #[inline]
    pub fn duplicates_removed(&self) -> usize {
        self.duplicates_removed
    }

    /// All entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[PaletteColor] {
        &self.entries
    }

    /// Device color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.entries[idx].rgb
    }

    /// Lab coordinates at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.entries[idx].lab
    }

    /// Device colors in insertion order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(PaletteColor::rgb)
    }

    /// Position of an exact device color, if present.
    pub fn position(&self, rgb: Rgb) -> Option<usize> {
        self.entries.iter().position(|e| e.rgb == rgb)
    }

    /// The entry perceptually closest to `pixel`.
    #[inline]
    pub fn nearest(&self, pixel: Rgb) -> &PaletteColor {
        &self.entries[self.nearest_index(pixel)]
    }

    /// Index of the entry perceptually closest to `pixel`.
    #[inline]
    pub fn nearest_index(&self, pixel: Rgb) -> usize {
        self.nearest_lab(Lab::from(pixel)).0
    }

    /// Find the entry closest to a Lab color.
    ///
    /// Returns `(index, squared_distance)`. Linear scan; the comparison is
    /// strict, so the earliest entry wins an exact tie.
    #[inline]
    pub fn nearest_lab(&self, color: Lab) -> (usize, f32) {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let dist = color.distance_squared(entry.lab);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }
}
