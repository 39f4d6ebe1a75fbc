//! Resampling seam and a dependency-free fallback.

use crate::color::Rgb;
use crate::output::RgbBuffer;

/// Error a [`Resize`] implementation may return.
pub type ResizeError = Box<dyn std::error::Error + Send + Sync>;

/// Brings a source buffer to an exact size.
///
/// The output must be exactly `width × height`; the compositor rejects
/// anything else. How aspect ratio is handled (padding, cropping, filter
/// choice) is up to the implementation. Implementations are shared across
/// worker threads, hence `Send + Sync`.
pub trait Resize: Send + Sync {
    /// Resample `source` to `width × height`.
    fn resize(
        &self,
        source: &RgbBuffer,
        width: usize,
        height: usize,
    ) -> Result<RgbBuffer, ResizeError>;
}

/// Aspect-preserving nearest-neighbour fit, centered on black.
///
/// The source is scaled to fit inside the target. By default it is only
/// ever scaled down; smaller sources keep their size and are padded.
///
/// # Example
///
/// ```
/// use mapart_dither::{NearestFit, Resize, Rgb, RgbBuffer};
///
/// let wide = RgbBuffer::filled(256, 64, Rgb::WHITE).unwrap();
/// let fitted = NearestFit::new().resize(&wide, 128, 128).unwrap();
///
/// assert_eq!(fitted.dimensions(), (128, 128));
/// assert_eq!(fitted.pixel(64, 0), Rgb::BLACK); // letterbox
/// assert_eq!(fitted.pixel(64, 64), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestFit {
    upscale: bool,
}

impl NearestFit {
    /// Downscale-only fit.
    pub const fn new() -> Self {
        Self { upscale: false }
    }

    /// Allow sources smaller than the target to be enlarged.
    pub fn upscale(mut self, upscale: bool) -> Self {
        self.upscale = upscale;
        self
    }
}

/// Size of `(src_w, src_h)` scaled to fit inside `(dst_w, dst_h)`.
///
/// Never returns a zero side and never exceeds the bounds.
pub(crate) fn fit_within(
    (src_w, src_h): (usize, usize),
    (dst_w, dst_h): (usize, usize),
    upscale: bool,
) -> (usize, usize) {
    let scale_x = dst_w as f64 / src_w as f64;
    let scale_y = dst_h as f64 / src_h as f64;
    let mut scale = scale_x.min(scale_y);
    if !upscale {
        scale = scale.min(1.0);
    }
    let w = ((src_w as f64 * scale).round() as usize).clamp(1, dst_w);
    let h = ((src_h as f64 * scale).round() as usize).clamp(1, dst_h);
    (w, h)
}

impl Resize for NearestFit {
    fn resize(
        &self,
        source: &RgbBuffer,
        width: usize,
        height: usize,
    ) -> Result<RgbBuffer, ResizeError> {
        let (src_w, src_h) = source.dimensions();
        let (fit_w, fit_h) = fit_within((src_w, src_h), (width, height), self.upscale);
        let off_x = (width - fit_w) / 2;
        let off_y = (height - fit_h) / 2;

        let out = RgbBuffer::from_fn(width, height, |x, y| {
            if x < off_x || y < off_y || x >= off_x + fit_w || y >= off_y + fit_h {
                return Rgb::BLACK;
            }
            // Sample at the center of the destination pixel
            let sx = ((2 * (x - off_x) + 1) * src_w / (2 * fit_w)).min(src_w - 1);
            let sy = ((2 * (y - off_y) + 1) * src_h / (2 * fit_h)).min(src_h - 1);
            source.pixel(sx, sy)
        })?;
        Ok(out)
    }
}
