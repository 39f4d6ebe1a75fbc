use image::imageops::{self, FilterType};
use image::RgbImage;

use mapart_dither::{Resize, ResizeError, Rgb, RgbBuffer};

use crate::models::ResizeMode;

/// Lanczos3 resampling onto the map canvas.
///
/// `Contain` fits the whole source inside the canvas and pads with black;
/// `Cover` fills the canvas and centre-crops the overflow. Without `upscale`
/// sources are never enlarged, so a small source ends up padded either way.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosFit {
    mode: ResizeMode,
    upscale: bool,
}

impl LanczosFit {
    pub fn new(mode: ResizeMode) -> Self {
        Self {
            mode,
            upscale: false,
        }
    }

    pub fn upscale(mut self, upscale: bool) -> Self {
        self.upscale = upscale;
        self
    }

    /// Size the source is resampled to before centring.
    fn scaled_size(&self, (src_w, src_h): (u32, u32), (dst_w, dst_h): (u32, u32)) -> (u32, u32) {
        let scale_x = dst_w as f64 / src_w as f64;
        let scale_y = dst_h as f64 / src_h as f64;
        let mut scale = match self.mode {
            ResizeMode::Contain => scale_x.min(scale_y),
            ResizeMode::Cover => scale_x.max(scale_y),
        };
        if !self.upscale {
            scale = scale.min(1.0);
        }

        let w = (src_w as f64 * scale).round().max(1.0) as u32;
        let h = (src_h as f64 * scale).round().max(1.0) as u32;
        match self.mode {
            ResizeMode::Contain => (w.min(dst_w), h.min(dst_h)),
            ResizeMode::Cover => (w, h),
        }
    }
}

impl Resize for LanczosFit {
    fn resize(
        &self,
        source: &RgbBuffer,
        width: usize,
        height: usize,
    ) -> Result<RgbBuffer, ResizeError> {
        let src_w = u32::try_from(source.width())?;
        let src_h = u32::try_from(source.height())?;
        let dst_w = u32::try_from(width)?;
        let dst_h = u32::try_from(height)?;

        let image = RgbImage::from_raw(src_w, src_h, source.as_bytes().to_vec())
            .ok_or("source buffer does not match its dimensions")?;

        let (fit_w, fit_h) = self.scaled_size((src_w, src_h), (dst_w, dst_h));
        let scaled = if (fit_w, fit_h) == (src_w, src_h) {
            image
        } else {
            imageops::resize(&image, fit_w, fit_h, FilterType::Lanczos3)
        };

        // Negative offsets crop, positive ones pad
        let off_x = (i64::from(dst_w) - i64::from(fit_w)) / 2;
        let off_y = (i64::from(dst_h) - i64::from(fit_h)) / 2;

        let out = RgbBuffer::from_fn(width, height, |x, y| {
            let sx = x as i64 - off_x;
            let sy = y as i64 - off_y;
            if sx < 0 || sy < 0 || sx >= i64::from(fit_w) || sy >= i64::from(fit_h) {
                return Rgb::BLACK;
            }
            Rgb::from_bytes(scaled.get_pixel(sx as u32, sy as u32).0)
        })?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, color: Rgb) -> RgbBuffer {
        RgbBuffer::filled(width, height, color).unwrap()
    }

    #[test]
    fn test_scaled_size_contain() {
        let fit = LanczosFit::new(ResizeMode::Contain);
        assert_eq!(fit.scaled_size((1024, 512), (256, 256)), (256, 128));
        assert_eq!(fit.scaled_size((64, 32), (256, 256)), (64, 32));
        assert_eq!(
            fit.upscale(true).scaled_size((64, 32), (256, 256)),
            (256, 128)
        );
    }

    #[test]
    fn test_scaled_size_cover() {
        let fit = LanczosFit::new(ResizeMode::Cover);
        assert_eq!(fit.scaled_size((1024, 512), (256, 256)), (512, 256));
        assert_eq!(fit.scaled_size((100, 50), (256, 256)), (100, 50));
    }

    #[test]
    fn test_contain_letterboxes_wide_source() {
        let source = solid(400, 100, Rgb::WHITE);
        let out = LanczosFit::new(ResizeMode::Contain)
            .resize(&source, 128, 128)
            .unwrap();

        assert_eq!(out.dimensions(), (128, 128));
        assert_eq!(out.pixel(64, 0), Rgb::BLACK);
        assert_eq!(out.pixel(64, 127), Rgb::BLACK);
        assert_eq!(out.pixel(64, 64), Rgb::WHITE);
    }

    #[test]
    fn test_cover_fills_canvas() {
        let source = solid(400, 200, Rgb::new(200, 10, 10));
        let out = LanczosFit::new(ResizeMode::Cover)
            .resize(&source, 128, 128)
            .unwrap();

        assert_eq!(out.dimensions(), (128, 128));
        assert!(out.pixels().all(|p| p == Rgb::new(200, 10, 10)));
    }

    #[test]
    fn test_cover_crops_centre() {
        // Left third red, middle third green, right third blue
        let source = RgbBuffer::from_fn(384, 128, |x, _| match x / 128 {
            0 => Rgb::new(255, 0, 0),
            1 => Rgb::new(0, 255, 0),
            _ => Rgb::new(0, 0, 255),
        })
        .unwrap();
        let out = LanczosFit::new(ResizeMode::Cover)
            .resize(&source, 128, 128)
            .unwrap();

        assert!(out.pixels().all(|p| p == Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_small_source_padded_without_upscale() {
        let source = solid(32, 32, Rgb::WHITE);
        let out = LanczosFit::new(ResizeMode::Contain)
            .resize(&source, 128, 128)
            .unwrap();

        assert_eq!(out.pixel(0, 0), Rgb::BLACK);
        assert_eq!(out.pixel(48, 48), Rgb::WHITE);
        assert_eq!(out.pixel(79, 79), Rgb::WHITE);
        assert_eq!(out.pixel(80, 80), Rgb::BLACK);
    }
}
