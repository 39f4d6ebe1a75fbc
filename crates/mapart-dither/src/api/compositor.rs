//! CanvasCompositor builder -- the primary entry point for the crate.
//!
//! [`CanvasCompositor`] takes a decoded source and a map grid through
//! preparation, one continuous dithering pass and tiling.

use std::borrow::Cow;

use crate::dither::{CancelFlag, Canvas, DitherEngine, DitherOptions, ErrorBuffer, ProgressSink};
use crate::output::{Composite, RgbBuffer};
use crate::palette::Palette;
use crate::preprocess::{GridConfig, NearestFit, Resize};

use super::error::DitherError;

static DEFAULT_RESIZER: NearestFit = NearestFit::new();

/// Lays a source image out over a grid of map tiles and dithers it.
///
/// The whole `128·map_width × 128·map_height` canvas is dithered in a single
/// pass, so error flows across tile seams exactly as it would inside a tile.
/// Tiles are cut from the finished canvas afterwards.
///
/// - Borrows the [`Palette`]; nothing is copied or mutated
/// - Configuration methods consume and return `self`
/// - [`compose()`](Self::compose) takes `&self` so one compositor can serve
///   many images
///
/// # Example
///
/// ```
/// use mapart_dither::{CanvasCompositor, GridConfig, Palette, Rgb, RgbBuffer};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let source = RgbBuffer::filled(640, 300, Rgb::new(200, 200, 200)).unwrap();
/// let grid = GridConfig::new(2, 1).unwrap();
///
/// let composite = CanvasCompositor::new(&palette).compose(&source, &grid).unwrap();
///
/// assert_eq!(composite.dithered().dimensions(), (256, 128));
/// assert_eq!(composite.tiles().count(), 2);
/// ```
pub struct CanvasCompositor<'a> {
    palette: &'a Palette,
    resizer: &'a dyn Resize,
    comparison: bool,
    options: DitherOptions,
    progress: Option<&'a dyn ProgressSink>,
    cancel: Option<&'a CancelFlag>,
}

impl<'a> CanvasCompositor<'a> {
    /// Compositor over `palette` using [`NearestFit`] for resizing.
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            resizer: &DEFAULT_RESIZER,
            comparison: false,
            options: DitherOptions::default(),
            progress: None,
            cancel: None,
        }
    }

    /// Use `resizer` to bring sources to the target size.
    pub fn resizer(mut self, resizer: &'a dyn Resize) -> Self {
        self.resizer = resizer;
        self
    }

    /// Also produce the resized original and the undithered quantization.
    pub fn comparison(mut self, enabled: bool) -> Self {
        self.comparison = enabled;
        self
    }

    /// Engine options for the dithering pass.
    pub fn options(mut self, options: DitherOptions) -> Self {
        self.options = options;
        self
    }

    /// Report dithering progress to `sink`.
    pub fn progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Stop between rows once `flag` is raised.
    pub fn cancel_flag(mut self, flag: &'a CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Bring `source` to exactly the grid's target size.
    ///
    /// Sources already at the target size are borrowed unchanged.
    ///
    /// # Errors
    ///
    /// - [`DitherError::DimensionMismatch`] if resizing is disabled and the
    ///   source is the wrong size, or if the resizer returns the wrong size
    /// - [`DitherError::Resize`] if the resizer fails
    pub fn prepare<'s>(
        &self,
        source: &'s RgbBuffer,
        grid: &GridConfig,
    ) -> Result<Cow<'s, RgbBuffer>, DitherError> {
        let target = (grid.target_width(), grid.target_height());
        if source.dimensions() == target {
            return Ok(Cow::Borrowed(source));
        }
        if !grid.resizes() {
            return Err(mismatch(target, source.dimensions()));
        }

        let resized = self
            .resizer
            .resize(source, target.0, target.1)
            .map_err(DitherError::Resize)?;
        if resized.dimensions() != target {
            return Err(mismatch(target, resized.dimensions()));
        }
        Ok(Cow::Owned(resized))
    }

    /// Prepare, dither and wrap `source` for `grid`.
    ///
    /// # Errors
    ///
    /// Anything [`prepare()`](Self::prepare) returns, and
    /// [`DitherError::Cancelled`] if the cancel flag is raised mid-run. A
    /// cancelled run yields nothing; the palette is unaffected.
    pub fn compose(&self, source: &RgbBuffer, grid: &GridConfig) -> Result<Composite, DitherError> {
        let prepared = self.prepare(source, grid)?;

        let engine = self.engine(true);
        let mut canvas = Canvas::from_buffer(&prepared);
        let mut errors = ErrorBuffer::for_canvas(&canvas);
        engine.dither_in_place(&mut canvas, &mut errors)?;
        let dithered = canvas.to_buffer();

        let (original, quantized) = if self.comparison {
            // Second pass over the same input, not reported as progress
            let quantized = self.engine(false).quantize(&prepared)?;
            (Some(prepared.into_owned()), Some(quantized))
        } else {
            (None, None)
        };

        Ok(Composite::new(dithered, original, quantized, *grid))
    }

    fn engine(&self, report_progress: bool) -> DitherEngine<'a> {
        let mut engine = DitherEngine::new(self.palette).options(self.options.clone());
        if let Some(flag) = self.cancel {
            engine = engine.cancel_flag(flag);
        }
        match self.progress {
            Some(sink) if report_progress => engine.progress(sink),
            _ => engine,
        }
    }
}

fn mismatch(expected: (usize, usize), actual: (usize, usize)) -> DitherError {
    DitherError::DimensionMismatch {
        expected_width: expected.0,
        expected_height: expected.1,
        actual_width: actual.0,
        actual_height: actual.1,
    }
}
