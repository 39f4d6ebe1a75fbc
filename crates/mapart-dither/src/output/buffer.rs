//! Owned 8-bit RGB raster.

use crate::api::DitherError;
use crate::color::Rgb;

/// A decoded image: `width × height` pixels, three bytes each, row-major,
/// no alpha.
///
/// Construction validates that both sides are non-zero and that the byte
/// length matches, so every `RgbBuffer` in circulation is well formed.
///
/// # Example
///
/// ```
/// use mapart_dither::{Rgb, RgbBuffer};
///
/// let buffer = RgbBuffer::new(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
/// assert_eq!(buffer.pixel(1, 0), Rgb::new(0, 0, 255));
/// assert!(RgbBuffer::new(2, 1, vec![0; 5]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Wrap raw `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// - [`DitherError::InvalidCanvasDimensions`] if either side is zero
    /// - [`DitherError::InvalidBufferLength`] if `data.len() != width * height * 3`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, DitherError> {
        if width == 0 || height == 0 {
            return Err(DitherError::InvalidCanvasDimensions { width, height });
        }
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(DitherError::InvalidBufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer of one solid color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, DitherError> {
        Self::from_fn(width, height, |_, _| color)
    }

    /// A buffer whose pixel at `(x, y)` is `f(x, y)`.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, DitherError>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_bytes());
            }
        }
        Self::new(width, height, data)
    }

    /// Internal constructor for data whose shape is already known good.
    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * 3;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    /// Copy out a rectangle.
    ///
    /// # Panics
    ///
    /// Panics if the rectangle is empty or reaches past the buffer.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> RgbBuffer {
        assert!(width > 0 && height > 0, "empty crop");
        assert!(
            x + width <= self.width && y + height <= self.height,
            "crop {width}x{height}+{x}+{y} outside {}x{}",
            self.width,
            self.height
        );
        let mut data = Vec::with_capacity(width * height * 3);
        for row in y..y + height {
            data.extend_from_slice(&self.row(row)[x * 3..(x + width) * 3]);
        }
        RgbBuffer::from_raw(width, height, data)
    }
}
