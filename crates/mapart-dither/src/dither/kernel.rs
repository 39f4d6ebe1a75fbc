//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// The kernel defines how quantization error is distributed to neighboring
/// pixels that haven't been processed yet. Each entry specifies an offset
/// (dx, dy) and a weight for that neighbor.
///
/// Each neighbor receives `error * weight / divisor`. Neighbors outside the
/// canvas are skipped and their share is dropped, not redistributed.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (0 = current row, 1 = row below)
    /// - `weight`: numerator of the share, see `divisor`
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Offsets paired with their fractional weight.
    pub fn taps(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        self.entries
            .iter()
            .map(|&(dx, dy, w)| (dx, dy, w as f32 / self.divisor as f32))
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
/// Every weight is a dyadic fraction, so the sum is exactly 1.0 in `f32`.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
