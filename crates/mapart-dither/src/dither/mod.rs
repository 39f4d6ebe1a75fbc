//! Error diffusion over a palette.
//!
//! [`DitherEngine`] quantizes a [`Canvas`] to a [`Palette`](crate::Palette)
//! with a Floyd-Steinberg kernel whose individual error shares are clamped.
//! The pass is strictly sequential: each pixel depends on error from every
//! pixel before it in raster order. Parallelism belongs one level up, across
//! independent canvases.
//!
//! # Example
//!
//! ```
//! use mapart_dither::{Canvas, DitherEngine, ErrorBuffer, Palette, Rgb, RgbBuffer};
//!
//! let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
//! let source = RgbBuffer::filled(8, 8, Rgb::new(64, 64, 64)).unwrap();
//!
//! let mut canvas = Canvas::from_buffer(&source);
//! let mut errors = ErrorBuffer::for_canvas(&canvas);
//! DitherEngine::new(&palette).dither_in_place(&mut canvas, &mut errors).unwrap();
//! assert!(errors.is_drained());
//! ```

mod canvas;
mod control;
mod engine;
mod kernel;
mod options;

pub use canvas::{Canvas, ErrorBuffer};
pub use control::{CancelFlag, ProgressEvent, ProgressSink};
pub use engine::DitherEngine;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::{DitherOptions, DEFAULT_ERROR_CLAMP, DEFAULT_PROGRESS_INTERVAL};

pub(crate) use engine::diffuse;
