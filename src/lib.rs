//! Mapart - dither images into block-based map art.
//!
//! Command-line front end over [`mapart_dither`]: palette files, image
//! decoding and resampling, PNG output and batch processing.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
