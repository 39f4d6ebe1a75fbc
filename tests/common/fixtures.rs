//! Test fixtures: source images and palette files written to scratch dirs.

use std::path::{Path, PathBuf};

use mapart::services::save_png;
use mapart_dither::{Rgb, RgbBuffer};

/// Small palette used where the full carpet set would hide behaviour
pub const TEST_PALETTE: [&str; 5] = ["#000000", "#FFFFFF", "#DC0000", "#006A00", "#3737DC"];

/// Diagonal colour gradient, deterministic for a given size
pub fn gradient(width: usize, height: usize) -> RgbBuffer {
    RgbBuffer::from_fn(width, height, |x, y| {
        Rgb::new(
            (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8,
            (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8,
            ((x + y) % 256) as u8,
        )
    })
    .unwrap()
}

/// Write `buffer` as `<dir>/<name>` and return the path
pub fn write_image(dir: &Path, name: &str, buffer: &RgbBuffer) -> PathBuf {
    let path = dir.join(name);
    save_png(&path, buffer).unwrap();
    path
}

/// Write a hex-list palette file
pub fn write_txt_palette(dir: &Path, name: &str, colors: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, colors.join("\n")).unwrap();
    path
}

/// Write an Adobe Color Table with a count footer
pub fn write_act_palette(dir: &Path, name: &str, colors: &[Rgb]) -> PathBuf {
    let mut bytes = vec![0u8; 768];
    for (i, c) in colors.iter().enumerate() {
        bytes[i * 3..i * 3 + 3].copy_from_slice(&c.to_bytes());
    }
    bytes.extend_from_slice(&(colors.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&[0xFF, 0xFF]);

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write an indexed PNG whose PLTE holds `colors`
pub fn write_indexed_png(dir: &Path, name: &str, colors: &[Rgb]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), colors.len() as u32, 1);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    let plte: Vec<u8> = colors.iter().flat_map(|c| c.to_bytes()).collect();
    encoder.set_palette(plte);
    let mut writer = encoder.write_header().unwrap();
    let indices: Vec<u8> = (0..colors.len() as u8).collect();
    writer.write_image_data(&indices).unwrap();
    path
}
