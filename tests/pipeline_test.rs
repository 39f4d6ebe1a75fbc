//! End-to-end tests of a single job: decode, compose, write.

mod common;

use common::*;
use pretty_assertions::assert_eq;

use mapart::error::AppError;
use mapart::models::AppConfig;
use mapart::services::{load_palette, process, DitherJob, JobSettings};
use mapart_dither::{CancelFlag, Palette, Rgb, RgbBuffer};

fn test_palette() -> Palette {
    Palette::from_hex(&TEST_PALETTE).unwrap()
}

fn settings(config: AppConfig) -> JobSettings {
    JobSettings::from_config(&config).unwrap()
}

#[test]
fn test_single_map_written_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "photo.png", &gradient(300, 200));
    let palette = test_palette();

    let job = DitherJob::new(&input, None, None);
    let report = process(&job, &palette, &settings(AppConfig::default()), None).unwrap();

    let output = dir.path().join("photo_dithered.png");
    assert_eq!(report.outputs, vec![output.clone()]);
    assert_eq!(report.source_size, (300, 200));
    assert_eq!(report.canvas_size, (128, 128));

    let dithered = assert_png_file(&output, 128, 128);
    assert_palette_only(&dithered, &palette);
}

#[test]
fn test_comparison_and_tiles() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "castle.png", &gradient(256, 256));
    let out_dir = dir.path().join("out");
    let palette = test_palette();
    let config = AppConfig {
        map_width: 2,
        map_height: 1,
        comparison: true,
        tiles: true,
        ..Default::default()
    };

    let job = DitherJob::new(&input, None, Some(&out_dir));
    let report = process(&job, &palette, &settings(config), None).unwrap();

    let expected: Vec<_> = [
        "castle_dithered.png",
        "castle_original.png",
        "castle_quantized.png",
        "castle_map_0.png",
        "castle_map_1.png",
    ]
    .iter()
    .map(|name| out_dir.join(name))
    .collect();
    assert_eq!(report.outputs, expected);

    let dithered = assert_png_file(&expected[0], 256, 128);
    let original = assert_png_file(&expected[1], 256, 128);
    let quantized = assert_png_file(&expected[2], 256, 128);
    let left = assert_png_file(&expected[3], 128, 128);
    let right = assert_png_file(&expected[4], 128, 128);

    assert_palette_only(&dithered, &palette);
    assert_palette_only(&quantized, &palette);
    assert_eq!(left, dithered.crop(0, 0, 128, 128));
    assert_eq!(right, dithered.crop(128, 0, 128, 128));

    // Plain quantization is the per-pixel nearest colour of the original
    let expected_quantized =
        RgbBuffer::from_fn(256, 128, |x, y| palette.nearest(original.pixel(x, y)).rgb()).unwrap();
    assert_eq!(quantized, expected_quantized);
}

#[test]
fn test_no_resize_rejects_wrong_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "small.png", &gradient(100, 100));
    let config = AppConfig {
        resize: false,
        ..Default::default()
    };

    let job = DitherJob::new(&input, None, None);
    let err = process(&job, &test_palette(), &settings(config), None).unwrap_err();

    assert!(matches!(err, AppError::Dither(_)));
    assert_eq!(
        err.to_string(),
        "Dither error: expected 128x128 pixels, got 100x100"
    );
    assert!(!dir.path().join("small_dithered.png").exists());
}

#[test]
fn test_no_resize_accepts_exact_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let source = gradient(128, 256);
    let input = write_image(dir.path(), "tall.png", &source);
    let config = AppConfig {
        map_height: 2,
        resize: false,
        comparison: true,
        ..Default::default()
    };

    let job = DitherJob::new(&input, None, None);
    process(&job, &test_palette(), &settings(config), None).unwrap();

    let original = assert_png_file(&dir.path().join("tall_original.png"), 128, 256);
    assert_eq!(original, source);
}

#[test]
fn test_palette_colored_input_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let palette = load_palette(None).unwrap();
    // Vertical stripes of carpet colours, already at canvas size
    let colors: Vec<Rgb> = palette.colors().collect();
    let source = RgbBuffer::from_fn(128, 128, |x, _| colors[x % colors.len()]).unwrap();
    let input = write_image(dir.path(), "stripes.png", &source);

    let job = DitherJob::new(&input, None, None);
    process(&job, &palette, &settings(AppConfig::default()), None).unwrap();

    let dithered = assert_png_file(&dir.path().join("stripes_dithered.png"), 128, 128);
    assert_eq!(dithered, source);
}

#[test]
fn test_cancelled_job_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_image(dir.path(), "photo.png", &gradient(128, 128));
    let flag = CancelFlag::new();
    flag.cancel();

    let job = DitherJob::new(&input, None, None);
    let err = process(
        &job,
        &test_palette(),
        &settings(AppConfig::default()),
        Some(&flag),
    )
    .unwrap_err();

    assert!(err.is_cancelled());
    assert!(!job.output.exists());
}

#[test]
fn test_unsupported_input_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "not an image").unwrap();

    let job = DitherJob::new(&input, None, None);
    let err = process(
        &job,
        &test_palette(),
        &settings(AppConfig::default()),
        None,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let job = DitherJob::new(dir.path().join("absent.png"), None, None);

    let err = process(
        &job,
        &test_palette(),
        &settings(AppConfig::default()),
        None,
    )
    .unwrap_err();

    assert!(!err.is_cancelled());
    assert!(!job.output.exists());
}
