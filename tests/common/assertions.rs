//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

use mapart::services::load_rgb;
use mapart_dither::{Palette, RgbBuffer};

/// Assert `path` exists and decodes as a PNG of the given size
pub fn assert_png_file(path: &Path, width: usize, height: usize) -> RgbBuffer {
    assert!(path.exists(), "Expected output file {}", path.display());

    let bytes = std::fs::read(path).unwrap();
    assert_eq!(
        &bytes[..8],
        b"\x89PNG\r\n\x1a\n",
        "{} is not a PNG",
        path.display()
    );

    let image = load_rgb(path).unwrap();
    assert_eq!(
        image.dimensions(),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    image
}

/// Assert every pixel of `buffer` is a palette entry
pub fn assert_palette_only(buffer: &RgbBuffer, palette: &Palette) {
    for (i, pixel) in buffer.pixels().enumerate() {
        assert!(
            palette.position(pixel).is_some(),
            "Pixel {} ({}, {}) is {pixel}, not in the palette",
            i,
            i % buffer.width(),
            i / buffer.width()
        );
    }
}
