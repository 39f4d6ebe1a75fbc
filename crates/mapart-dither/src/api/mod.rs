//! Public API for the mapart-dither crate.
//!
//! This module provides the high-level API: [`CanvasCompositor`] builder and
//! [`DitherError`] unified error type.

mod compositor;
mod error;

pub use compositor::CanvasCompositor;
pub use error::DitherError;
