//! Sequential error diffusion over a whole canvas.

use crate::api::DitherError;
use crate::color::Rgb;
use crate::output::RgbBuffer;
use crate::palette::{MatchCache, Palette};

use super::canvas::{Canvas, ErrorBuffer};
use super::control::{CancelFlag, ProgressEvent, ProgressSink};
use super::kernel::{Kernel, FLOYD_STEINBERG};
use super::options::DitherOptions;

/// Palette-restricted Floyd-Steinberg ditherer.
///
/// Visits pixels in strict raster order (top row first, left to right). For
/// each pixel the pending error is drained and added to the source value; the
/// sum is clamped to `0..=255`, rounded, and matched in Lab against the
/// palette. The matched color is written back and the difference between the
/// *unclamped* adjusted value and the match is spread forward, each share
/// clamped to [`DitherOptions::error_clamp`].
///
/// A run has no state outside the canvas and error buffer it is given, so
/// independent canvases can be dithered concurrently against the same
/// palette.
///
/// # Example
///
/// ```
/// use mapart_dither::{DitherEngine, Palette, Rgb, RgbBuffer};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let source = RgbBuffer::filled(16, 16, Rgb::new(128, 128, 128)).unwrap();
///
/// let out = DitherEngine::new(&palette).dither(&source).unwrap();
/// assert!(out.pixels().all(|p| p == Rgb::BLACK || p == Rgb::WHITE));
/// ```
pub struct DitherEngine<'a> {
    palette: &'a Palette,
    kernel: &'static Kernel,
    options: DitherOptions,
    progress: Option<&'a dyn ProgressSink>,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> DitherEngine<'a> {
    /// Engine over `palette` with default options.
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            kernel: &FLOYD_STEINBERG,
            options: DitherOptions::default(),
            progress: None,
            cancel: None,
        }
    }

    /// Replace the options.
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    /// Report progress to `sink`.
    pub fn progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Stop between rows once `flag` is raised.
    pub fn cancel_flag(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The palette this engine quantizes to.
    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Dither `canvas` in place.
    ///
    /// On return every pixel of `canvas` holds a palette color and `errors`
    /// is fully drained.
    ///
    /// # Errors
    ///
    /// - [`DitherError::InvalidCanvasDimensions`] for an empty canvas
    /// - [`DitherError::DimensionMismatch`] if `errors` has another size
    /// - [`DitherError::Cancelled`] if the cancel flag was raised; the canvas
    ///   is then only partly quantized and should be discarded
    pub fn dither_in_place(
        &self,
        canvas: &mut Canvas,
        errors: &mut ErrorBuffer,
    ) -> Result<(), DitherError> {
        let (width, height) = (canvas.width(), canvas.height());
        check_dimensions(width, height)?;
        if errors.width() != width || errors.height() != height {
            return Err(DitherError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: errors.width(),
                actual_height: errors.height(),
            });
        }

        let limit = self.options.clamp_limit();
        let mut cache = MatchCache::new(self.palette);

        for y in 0..height {
            self.check_cancelled(y, height)?;

            for x in 0..width {
                let source = canvas.get(x, y);
                let pending = errors.take(x, y);
                let adjusted = [
                    source[0] + pending[0],
                    source[1] + pending[1],
                    source[2] + pending[2],
                ];

                let matched = cache.nearest(Rgb::from_f32_saturating(adjusted));
                let target = matched.to_f32();
                canvas.set(x, y, target);

                let error = [
                    adjusted[0] - target[0],
                    adjusted[1] - target[1],
                    adjusted[2] - target[2],
                ];
                diffuse(self.kernel, errors, x, y, error, limit);
            }

            self.report(y + 1, height, width);
        }

        Ok(())
    }

    /// Map every pixel to its nearest palette color without diffusion.
    ///
    /// Produces the naive comparison image.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidCanvasDimensions`] or [`DitherError::Cancelled`].
    pub fn quantize_only(&self, canvas: &mut Canvas) -> Result<(), DitherError> {
        let (width, height) = (canvas.width(), canvas.height());
        check_dimensions(width, height)?;

        let mut cache = MatchCache::new(self.palette);

        for y in 0..height {
            self.check_cancelled(y, height)?;

            for x in 0..width {
                let pixel = Rgb::from_f32_saturating(canvas.get(x, y));
                canvas.set(x, y, cache.nearest(pixel).to_f32());
            }

            self.report(y + 1, height, width);
        }

        Ok(())
    }

    /// Dither an 8-bit buffer into a new buffer.
    pub fn dither(&self, source: &RgbBuffer) -> Result<RgbBuffer, DitherError> {
        let mut canvas = Canvas::from_buffer(source);
        let mut errors = ErrorBuffer::for_canvas(&canvas);
        self.dither_in_place(&mut canvas, &mut errors)?;
        Ok(canvas.to_buffer())
    }

    /// Nearest-color map an 8-bit buffer into a new buffer.
    pub fn quantize(&self, source: &RgbBuffer) -> Result<RgbBuffer, DitherError> {
        let mut canvas = Canvas::from_buffer(source);
        self.quantize_only(&mut canvas)?;
        Ok(canvas.to_buffer())
    }

    fn check_cancelled(&self, rows_completed: usize, total_rows: usize) -> Result<(), DitherError> {
        match self.cancel {
            Some(flag) if flag.is_cancelled() => Err(DitherError::Cancelled {
                rows_completed,
                total_rows,
            }),
            _ => Ok(()),
        }
    }

    fn report(&self, rows_done: usize, total_rows: usize, width: usize) {
        let Some(sink) = self.progress else {
            return;
        };
        let interval = self.options.progress_interval;
        let on_interval = interval > 0 && rows_done % interval == 0;
        if on_interval || rows_done == total_rows {
            sink.on_progress(ProgressEvent {
                rows_done,
                total_rows,
                width,
            });
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), DitherError> {
    if width == 0 || height == 0 {
        return Err(DitherError::InvalidCanvasDimensions { width, height });
    }
    Ok(())
}

/// Spread `error` from `(x, y)` to the kernel's in-bounds neighbors.
///
/// Each share is clamped to `[-limit, limit]` per channel before it is
/// accumulated. Shares aimed outside the buffer are dropped.
pub(crate) fn diffuse(
    kernel: &Kernel,
    errors: &mut ErrorBuffer,
    x: usize,
    y: usize,
    error: [f32; 3],
    limit: f32,
) {
    for (dx, dy, weight) in kernel.taps() {
        let nx = x as isize + dx as isize;
        let ny = y as isize + dy as isize;
        if nx < 0 || ny < 0 {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if nx >= errors.width() || ny >= errors.height() {
            continue;
        }

        let share = [
            (error[0] * weight).clamp(-limit, limit),
            (error[1] * weight).clamp(-limit, limit),
            (error[2] * weight).clamp(-limit, limit),
        ];
        errors.add(nx, ny, share);
    }
}
