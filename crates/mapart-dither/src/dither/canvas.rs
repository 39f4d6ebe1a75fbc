//! Working canvas and error accumulator.

use crate::api::DitherError;
use crate::color::Rgb;
use crate::output::RgbBuffer;

/// A grid of working pixel values.
///
/// Channels are `f32` in 8-bit units so the engine can hold values that
/// error injection pushes outside `0..=255`. Row-major, one `[r, g, b]`
/// per pixel.
///
/// Any positive size is accepted. Map canvases are kept to multiples of 128
/// by [`GridConfig`](crate::GridConfig) and
/// [`CanvasCompositor::prepare`](crate::CanvasCompositor::prepare).
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    /// Create a black canvas.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidCanvasDimensions`] if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, DitherError> {
        if width == 0 || height == 0 {
            return Err(DitherError::InvalidCanvasDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
        })
    }

    /// Load an 8-bit buffer onto a new canvas.
    pub fn from_buffer(buffer: &RgbBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.pixels().map(Rgb::to_f32).collect(),
        }
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Working value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.width + x]
    }

    /// Overwrite the working value at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: [f32; 3]) {
        self.pixels[y * self.width + x] = value;
    }

    /// Snap every value to 8 bits.
    pub fn to_buffer(&self) -> RgbBuffer {
        let data = self
            .pixels
            .iter()
            .flat_map(|&p| Rgb::from_f32_saturating(p).to_bytes())
            .collect();
        RgbBuffer::from_raw(self.width, self.height, data)
    }
}

/// Per-pixel accumulator of diffused error not yet applied.
///
/// Same footprint as the [`Canvas`] it serves. The engine adds forward
/// contributions with [`add`](Self::add) and drains a pixel's entry with
/// [`take`](Self::take) when it visits that pixel; a drained entry is never
/// written again during the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBuffer {
    width: usize,
    height: usize,
    errors: Vec<[f32; 3]>,
}

impl ErrorBuffer {
    /// Create a zeroed accumulator.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            errors: vec![[0.0; 3]; width * height],
        }
    }

    /// Accumulator sized to `canvas`.
    pub fn for_canvas(canvas: &Canvas) -> Self {
        Self::new(canvas.width(), canvas.height())
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pending error at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.errors[y * self.width + x]
    }

    /// Accumulate a contribution at `(x, y)`.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, error: [f32; 3]) {
        let slot = &mut self.errors[y * self.width + x];
        for c in 0..3 {
            slot[c] += error[c];
        }
    }

    /// Return the pending error at `(x, y)` and reset it to zero.
    #[inline]
    pub fn take(&mut self, x: usize, y: usize) -> [f32; 3] {
        std::mem::take(&mut self.errors[y * self.width + x])
    }

    /// Largest absolute pending value over all pixels and channels.
    pub fn max_abs(&self) -> f32 {
        self.errors
            .iter()
            .flatten()
            .fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    /// True if no error is pending anywhere.
    pub fn is_drained(&self) -> bool {
        self.errors.iter().flatten().all(|&v| v == 0.0)
    }
}
