use serde::Serialize;

use mapart_dither::{Palette, Rgb, RgbBuffer};

use crate::error::AppError;

/// Swatches per row in a palette preview.
pub const PREVIEW_COLUMNS: usize = 4;

/// Edge length of one swatch in pixels.
pub const SWATCH_SIZE: usize = 50;

/// Grid of solid swatches in palette order on a white background.
pub fn palette_preview(
    palette: &Palette,
    columns: usize,
    swatch: usize,
) -> Result<RgbBuffer, AppError> {
    let columns = columns.max(1);
    let rows = palette.len().div_ceil(columns);

    let preview = RgbBuffer::from_fn(columns * swatch, rows * swatch, |x, y| {
        let idx = (y / swatch) * columns + x / swatch;
        if idx < palette.len() {
            palette.color(idx)
        } else {
            Rgb::WHITE
        }
    })?;
    Ok(preview)
}

/// Summary printed by `mapart palette --json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaletteInfo {
    pub color_count: usize,
    pub duplicates_removed: usize,
    pub colors: Vec<String>,
    pub color_space: &'static str,
    pub algorithm: &'static str,
}

impl PaletteInfo {
    pub fn new(palette: &Palette) -> Self {
        Self {
            color_count: palette.len(),
            duplicates_removed: palette.duplicates_removed(),
            colors: palette.colors().map(|c| c.to_string()).collect(),
            color_space: "LAB (perceptual)",
            algorithm: "Floyd-Steinberg Error Diffusion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_layout() {
        let colors: Vec<Rgb> = (0..6u8).map(|i| Rgb::new(i * 40, 0, 0)).collect();
        let palette = Palette::new(&colors).unwrap();

        let preview = palette_preview(&palette, PREVIEW_COLUMNS, SWATCH_SIZE).unwrap();

        assert_eq!(preview.dimensions(), (200, 100));
        assert_eq!(preview.pixel(0, 0), colors[0]);
        assert_eq!(preview.pixel(199, 49), colors[3]);
        assert_eq!(preview.pixel(50, 50), colors[5]);
        // Unused cells stay white
        assert_eq!(preview.pixel(150, 75), Rgb::WHITE);
    }

    #[test]
    fn test_palette_info_json() {
        let palette = Palette::new(&[Rgb::BLACK, Rgb::new(0xDC, 0, 0), Rgb::BLACK]).unwrap();
        let info = PaletteInfo::new(&palette);

        assert_eq!(info.color_count, 2);
        assert_eq!(info.duplicates_removed, 1);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["colors"][1], "#DC0000");
        assert_eq!(json["algorithm"], "Floyd-Steinberg Error Diffusion");
    }
}
