//! Palette files: Adobe colour tables, PNG palettes and hex lists.
//!
//! Every loader yields colours in file order with duplicates dropped, so the
//! first occurrence of a colour keeps its position in the palette.

use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mapart_dither::{DitherError, Palette, Rgb};

use crate::error::AppError;

/// The 61 Minecraft carpet colours used when no palette file is given.
pub const CARPET_COLORS: [&str; 61] = [
    "#DC0000", "#A3292A", "#842C2C", "#8A4243", "#7A3327", "#600100", "#4F1519", "#BA6D2C",
    "#A0721F", "#89461F", "#6F4A2A", "#7B663E", "#58412C", "#825E42", "#745C54", "#B4988A",
    "#BA967E", "#D5C98C", "#C5C52C", "#D7CD42", "#6D9930", "#6DB015", "#58642D", "#586D2C",
    "#414624", "#006A00", "#00BB32", "#6D9081", "#119B72", "#327A78", "#126C73", "#416D84",
    "#5884BA", "#3F6EDC", "#3737DC", "#2C4199", "#4FBCB7", "#8A8ADC", "#8D909E", "#605D77",
    "#41354F", "#9941BA", "#6D3699", "#D06D8E", "#7F3653", "#804B5D", "#693E4B", "#4A2535",
    "#DCDCDC", "#DCD9D3", "#ABABAB", "#909090", "#848484", "#606060", "#565656", "#4B4F4F",
    "#414141", "#151515", "#1F120D", "#31231E", "#412B1E",
];

/// Size of the colour table in an ACT file (256 RGB triplets).
const ACT_TABLE_LEN: usize = 768;

/// Palette file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFormat {
    Act,
    Png,
    Txt,
}

impl PaletteFormat {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("act") => Ok(PaletteFormat::Act),
            Some("png") => Ok(PaletteFormat::Png),
            Some("txt") => Ok(PaletteFormat::Txt),
            _ => Err(AppError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Colours read from a palette file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedColors {
    pub colors: Vec<Rgb>,
    pub duplicates_removed: usize,
}

impl ExtractedColors {
    fn from_raw(raw: Vec<Rgb>) -> Self {
        let total = raw.len();
        let mut seen = HashSet::with_capacity(total);
        let colors: Vec<Rgb> = raw.into_iter().filter(|c| seen.insert(*c)).collect();
        Self {
            duplicates_removed: total - colors.len(),
            colors,
        }
    }
}

/// The built-in carpet palette.
pub fn builtin_palette() -> Result<Palette, AppError> {
    Palette::from_hex(&CARPET_COLORS).map_err(|e| AppError::Dither(DitherError::from(e)))
}

/// Load the palette at `path`, or the built-in palette when `path` is `None`.
pub fn load_palette(path: Option<&Path>) -> Result<Palette, AppError> {
    let Some(path) = path else {
        let palette = builtin_palette()?;
        tracing::info!(colors = palette.len(), "Using built-in carpet palette");
        return Ok(palette);
    };

    let extracted = extract_colors(path)?;
    let palette = Palette::new(&extracted.colors).map_err(|e| AppError::PaletteFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!(
        path = %path.display(),
        colors = palette.len(),
        duplicates_removed = extracted.duplicates_removed,
        "Loaded palette"
    );
    Ok(palette)
}

/// Read the colours of a palette file in file order, without duplicates.
pub fn extract_colors(path: &Path) -> Result<ExtractedColors, AppError> {
    let raw = match PaletteFormat::from_path(path)? {
        PaletteFormat::Act => parse_act(&std::fs::read(path)?),
        PaletteFormat::Png => read_png_colors(path)?,
        PaletteFormat::Txt => {
            parse_hex_list(&std::fs::read_to_string(path)?).map_err(|e| AppError::PaletteFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        }
    };

    if raw.is_empty() {
        return Err(AppError::PaletteFile {
            path: path.to_path_buf(),
            reason: "no colors found".to_string(),
        });
    }
    Ok(ExtractedColors::from_raw(raw))
}

/// Decode an Adobe Color Table.
///
/// The table holds up to 256 RGB triplets. Files written with the optional
/// 4-byte footer carry the number of used entries as a big-endian `u16`.
pub fn parse_act(bytes: &[u8]) -> Vec<Rgb> {
    let table = &bytes[..bytes.len().min(ACT_TABLE_LEN)];
    let mut count = table.len() / 3;

    if bytes.len() >= ACT_TABLE_LEN + 4 {
        let declared = u16::from_be_bytes([bytes[ACT_TABLE_LEN], bytes[ACT_TABLE_LEN + 1]]);
        if (1..=256).contains(&declared) {
            count = declared as usize;
        }
    }

    table
        .chunks_exact(3)
        .take(count)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect()
}

/// Every `#RRGGBB` (the `#` is optional) in `text`, in order.
pub fn parse_hex_list(text: &str) -> Result<Vec<Rgb>, regex::Error> {
    let pattern = Regex::new(r"#?([0-9A-Fa-f]{6})")?;
    Ok(pattern
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<Rgb>().ok())
        .collect())
}

/// Indexed PNGs yield their PLTE entries, other PNGs their distinct pixels.
fn read_png_colors(path: &Path) -> Result<Vec<Rgb>, AppError> {
    let file = File::open(path)?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let reader = decoder
        .read_info()
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let info = reader.info();

    if info.color_type == png::ColorType::Indexed {
        let plte = info.palette.as_ref().ok_or_else(|| AppError::PaletteFile {
            path: path.to_path_buf(),
            reason: "indexed PNG has no PLTE chunk".to_string(),
        })?;
        return Ok(plte
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect());
    }

    let image = image::open(path)?.to_rgb8();
    let mut seen = HashSet::new();
    Ok(image
        .pixels()
        .map(|p| Rgb::from_bytes(p.0))
        .filter(|c| seen.insert(*c))
        .collect())
}

/// Write `colors` as a hex list, one `#RRGGBB` per line.
pub fn write_hex_list(path: &Path, colors: &[Rgb]) -> Result<(), AppError> {
    let mut out = String::with_capacity(colors.len() * 8);
    for color in colors {
        out.push_str(&color.to_string());
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_palette_has_61_distinct_colors() {
        let palette = builtin_palette().unwrap();
        assert_eq!(palette.len(), 61);
        assert_eq!(palette.duplicates_removed(), 0);
        assert_eq!(palette.color(0), Rgb::new(0xDC, 0x00, 0x00));
        assert_eq!(palette.color(60), Rgb::new(0x41, 0x2B, 0x1E));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            PaletteFormat::from_path(Path::new("a.ACT")).unwrap(),
            PaletteFormat::Act
        );
        assert_eq!(
            PaletteFormat::from_path(Path::new("dir/a.png")).unwrap(),
            PaletteFormat::Png
        );
        assert_eq!(
            PaletteFormat::from_path(Path::new("a.txt")).unwrap(),
            PaletteFormat::Txt
        );
        assert!(matches!(
            PaletteFormat::from_path(Path::new("a.gpl")),
            Err(AppError::UnsupportedFormat(_))
        ));
        assert!(PaletteFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_parse_act_full_table() {
        let bytes: Vec<u8> = (0..256u32).flat_map(|i| [i as u8, 0, 255 - i as u8]).collect();
        let colors = parse_act(&bytes);
        assert_eq!(colors.len(), 256);
        assert_eq!(colors[0], Rgb::new(0, 0, 255));
        assert_eq!(colors[255], Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_parse_act_footer_limits_entries() {
        let mut bytes = vec![0u8; ACT_TABLE_LEN];
        bytes[3..6].copy_from_slice(&[10, 20, 30]);
        bytes.extend_from_slice(&[0, 2, 0xFF, 0xFF]);

        let colors = parse_act(&bytes);
        assert_eq!(colors, vec![Rgb::new(0, 0, 0), Rgb::new(10, 20, 30)]);
    }

    #[test]
    fn test_parse_act_short_file() {
        let colors = parse_act(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(colors, vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
    }

    #[test]
    fn test_parse_hex_list() {
        let text = "red: #ff0000\n00FF00 and #0000Ff\nnot a color: #12345\n";
        assert_eq!(
            parse_hex_list(text).unwrap(),
            vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
            ]
        );
    }

    #[test]
    fn test_extracted_colors_dedup_keeps_first() {
        let raw = vec![
            Rgb::new(1, 1, 1),
            Rgb::new(2, 2, 2),
            Rgb::new(1, 1, 1),
            Rgb::new(3, 3, 3),
            Rgb::new(2, 2, 2),
        ];
        let extracted = ExtractedColors::from_raw(raw);
        assert_eq!(
            extracted.colors,
            vec![Rgb::new(1, 1, 1), Rgb::new(2, 2, 2), Rgb::new(3, 3, 3)]
        );
        assert_eq!(extracted.duplicates_removed, 2);
    }

    #[test]
    fn test_load_palette_none_is_builtin() {
        let palette = load_palette(None).unwrap();
        assert_eq!(palette.len(), CARPET_COLORS.len());
    }
}
