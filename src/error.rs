use std::path::PathBuf;

use mapart_dither::DitherError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Dither error: {0}")]
    Dither(#[from] DitherError),

    #[error("Invalid palette file {}: {reason}", path.display())]
    PaletteFile { path: PathBuf, reason: String },

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error(
        "{} and {} would both write {}",
        first.display(),
        second.display(),
        output.display()
    )]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}

impl AppError {
    /// True when the underlying dither run was stopped through its cancel flag.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Dither(e) if e.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_png_encode() {
        let error = AppError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_app_error_png_decode() {
        let error = AppError::PngDecode("bad chunk".to_string());
        assert_eq!(error.to_string(), "PNG decode error: bad chunk");
    }

    #[test]
    fn test_app_error_palette_file() {
        let error = AppError::PaletteFile {
            path: PathBuf::from("colors.act"),
            reason: "no colors found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid palette file colors.act: no colors found"
        );
    }

    #[test]
    fn test_app_error_unsupported_format() {
        let error = AppError::UnsupportedFormat(PathBuf::from("photo.xyz"));
        assert_eq!(error.to_string(), "Unsupported file format: photo.xyz");
    }

    #[test]
    fn test_app_error_config() {
        let error = AppError::Config("missing field".to_string());
        assert_eq!(error.to_string(), "Config error: missing field");
    }

    #[test]
    fn test_app_error_output_collision() {
        let error = AppError::OutputCollision {
            output: PathBuf::from("out/img_dithered.png"),
            first: PathBuf::from("a/img.png"),
            second: PathBuf::from("b/img.jpg"),
        };
        assert_eq!(
            error.to_string(),
            "a/img.png and b/img.jpg would both write out/img_dithered.png"
        );
    }

    #[test]
    fn test_app_error_from_dither_error() {
        let dither_error = DitherError::Cancelled {
            rows_completed: 3,
            total_rows: 128,
        };
        let app_error: AppError = dither_error.into();
        assert!(app_error.is_cancelled());
        match app_error {
            AppError::Dither(_) => {}
            _ => panic!("Expected Dither variant"),
        }
    }

    #[test]
    fn test_app_error_io_not_cancelled() {
        let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!error.is_cancelled());
        assert_eq!(error.to_string(), "IO error: gone");
    }
}
