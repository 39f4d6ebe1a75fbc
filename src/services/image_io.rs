use std::io::Cursor;
use std::path::Path;

use mapart_dither::RgbBuffer;

use crate::error::AppError;

/// Input extensions accepted by the `dither` command.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "gif"];

/// Whether `path` has an input extension we can decode (case-insensitive).
pub fn is_supported_format(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Decode an image file into 8-bit RGB. Alpha is dropped.
pub fn load_rgb(path: &Path) -> Result<RgbBuffer, AppError> {
    if !is_supported_format(path) {
        return Err(AppError::UnsupportedFormat(path.to_path_buf()));
    }

    let image = image::open(path)?.to_rgb8();
    let (width, height) = image.dimensions();
    tracing::debug!(path = %path.display(), width, height, "Decoded image");

    Ok(RgbBuffer::new(
        width as usize,
        height as usize,
        image.into_raw(),
    )?)
}

/// Encode `buffer` as an 8-bit RGB PNG.
pub fn encode_png(buffer: &RgbBuffer) -> Result<Vec<u8>, AppError> {
    let (width, height) = png_dimensions(buffer)?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode `buffer` and write it to `path`.
pub fn save_png(path: &Path, buffer: &RgbBuffer) -> Result<(), AppError> {
    let bytes = encode_png(buffer)?;
    std::fs::write(path, bytes)?;
    tracing::debug!(path = %path.display(), "Wrote PNG");
    Ok(())
}

fn png_dimensions(buffer: &RgbBuffer) -> Result<(u32, u32), AppError> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| AppError::PngEncode(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| AppError::PngEncode(format!("height {} too large", buffer.height())))?;
    Ok((width, height))
}
