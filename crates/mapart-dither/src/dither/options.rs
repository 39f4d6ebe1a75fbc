//! Dithering options and configuration.

/// Configuration options for the dithering engine.
///
/// # Defaults
///
/// - Error clamp: 32.0 per channel, in 8-bit units
/// - Progress interval: every 8 rows
///
/// # Example
///
/// ```
/// use mapart_dither::DitherOptions;
///
/// let options = DitherOptions::new()
///     .error_clamp(24.0)
///     .progress_interval(16);
/// assert_eq!(options.error_clamp, 24.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Largest magnitude, per channel, of a single diffused contribution.
    ///
    /// Every share of quantization error is clamped to
    /// `[-error_clamp, error_clamp]` before it is added to a neighbor.
    /// Keeps error from piling up when the palette covers only part of the
    /// image's range. A non-finite value disables clamping.
    ///
    /// Default: `32.0`
    pub error_clamp: f32,

    /// Rows between progress notifications.
    ///
    /// A notification always follows the final row. `0` leaves only that one.
    ///
    /// Default: `8`
    pub progress_interval: usize,
}

/// Default per-contribution error clamp.
pub const DEFAULT_ERROR_CLAMP: f32 = 32.0;

/// Default rows between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 8;

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            error_clamp: DEFAULT_ERROR_CLAMP,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error clamping threshold.
    #[inline]
    pub fn error_clamp(mut self, clamp: f32) -> Self {
        self.error_clamp = clamp;
        self
    }

    /// Set the number of rows between progress notifications.
    #[inline]
    pub fn progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows;
        self
    }

    /// The clamp as a usable bound: magnitude of a finite value, else `f32::MAX`.
    pub(crate) fn clamp_limit(&self) -> f32 {
        if self.error_clamp.is_finite() {
            self.error_clamp.abs()
        } else {
            f32::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = DitherOptions::default();
        assert_eq!(opts.error_clamp, 32.0, "error_clamp should default to 32");
        assert_eq!(opts.progress_interval, 8);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(DitherOptions::new(), DitherOptions::default());
    }

    #[test]
    fn test_builder_chaining() {
        let opts = DitherOptions::new().error_clamp(12.5).progress_interval(0);
        assert_eq!(opts.error_clamp, 12.5);
        assert_eq!(opts.progress_interval, 0);
    }

    #[test]
    fn test_clamp_limit_normalizes() {
        assert_eq!(DitherOptions::new().error_clamp(-20.0).clamp_limit(), 20.0);
        assert_eq!(
            DitherOptions::new().error_clamp(f32::INFINITY).clamp_limit(),
            f32::MAX
        );
        assert_eq!(
            DitherOptions::new().error_clamp(f32::NAN).clamp_limit(),
            f32::MAX
        );
    }
}
