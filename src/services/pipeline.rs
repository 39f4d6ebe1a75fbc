//! One input file through load, compose and write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use mapart_dither::{
    CancelFlag, CanvasCompositor, Composite, DitherOptions, GridConfig, Palette, ProgressEvent,
};

use crate::error::AppError;
use crate::models::AppConfig;
use crate::services::image_io::{load_rgb, save_png};
use crate::services::resizer::LanczosFit;

/// Settings shared by every job of a run.
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub grid: GridConfig,
    pub resizer: LanczosFit,
    pub options: DitherOptions,
    pub comparison: bool,
    pub tiles: bool,
}

impl JobSettings {
    /// Resolve settings from a (CLI-merged) configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let grid =
            GridConfig::new(config.map_width, config.map_height)?.resize_to_target(config.resize);
        Ok(Self {
            grid,
            resizer: LanczosFit::new(config.resize_mode).upscale(config.upscale),
            options: DitherOptions::new()
                .error_clamp(config.error_clamp)
                .progress_interval(config.progress_interval),
            comparison: config.comparison,
            tiles: config.tiles,
        })
    }
}

/// An input image and where its dithered result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl DitherJob {
    /// Job writing to `output`, or to `<stem>_dithered.png` in `out_dir`
    /// (next to the input when `out_dir` is `None`).
    pub fn new(input: impl Into<PathBuf>, output: Option<PathBuf>, out_dir: Option<&Path>) -> Self {
        let input = input.into();
        let output = output.unwrap_or_else(|| {
            let name = format!("{}_dithered.png", file_stem(&input));
            match out_dir {
                Some(dir) => dir.join(name),
                None => input.with_file_name(name),
            }
        });
        Self { input, output }
    }

    /// `<stem>_<suffix>.png` beside the dithered output.
    pub fn companion(&self, suffix: &str) -> PathBuf {
        self.output
            .with_file_name(format!("{}_{suffix}.png", file_stem(&self.input)))
    }

    /// Path of the map tile with row-major `index`.
    pub fn tile_path(&self, index: usize) -> PathBuf {
        self.companion(&format!("map_{index}"))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// What a finished job produced.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub input: PathBuf,
    pub source_size: (usize, usize),
    pub canvas_size: (usize, usize),
    pub outputs: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Dither one file and write every requested output.
pub fn process(
    job: &DitherJob,
    palette: &Palette,
    settings: &JobSettings,
    cancel: Option<&CancelFlag>,
) -> Result<JobReport, AppError> {
    let start = Instant::now();
    let input = job.input.display().to_string();

    let source = load_rgb(&job.input)?;
    tracing::info!(
        input = %input,
        width = source.width(),
        height = source.height(),
        "Loaded image"
    );

    let progress = |event: ProgressEvent| {
        tracing::debug!(
            input = %input,
            rows = event.rows_done,
            total_rows = event.total_rows,
            percent = event.fraction() * 100.0,
            "Dithering"
        );
    };

    let mut compositor = CanvasCompositor::new(palette)
        .resizer(&settings.resizer)
        .comparison(settings.comparison)
        .options(settings.options.clone())
        .progress(&progress);
    if let Some(flag) = cancel {
        compositor = compositor.cancel_flag(flag);
    }
    let composite = compositor.compose(&source, &settings.grid)?;

    let outputs = write_outputs(job, &composite, settings.tiles)?;
    let elapsed = start.elapsed();
    tracing::info!(
        input = %input,
        outputs = outputs.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Finished"
    );

    Ok(JobReport {
        input: job.input.clone(),
        source_size: source.dimensions(),
        canvas_size: composite.dithered().dimensions(),
        outputs,
        elapsed,
    })
}

fn write_outputs(
    job: &DitherJob,
    composite: &Composite,
    tiles: bool,
) -> Result<Vec<PathBuf>, AppError> {
    if let Some(dir) = job.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let mut written = Vec::new();
    let mut write = |path: PathBuf, buffer: &mapart_dither::RgbBuffer| -> Result<(), AppError> {
        save_png(&path, buffer)?;
        tracing::info!(path = %path.display(), "Wrote output");
        written.push(path);
        Ok(())
    };

    write(job.output.clone(), composite.dithered())?;
    if let Some(original) = composite.original() {
        write(job.companion("original"), original)?;
    }
    if let Some(quantized) = composite.quantized() {
        write(job.companion("quantized"), quantized)?;
    }
    if tiles {
        for tile in composite.tiles() {
            write(job.tile_path(tile.index()), &tile.to_buffer())?;
        }
    }
    Ok(written)
}
