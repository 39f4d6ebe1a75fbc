use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mapart::models::AppConfig;
use mapart::services::{
    extract_colors, load_palette, palette_preview, run_batch, save_png, write_hex_list,
    DitherJob, JobSettings, PaletteInfo, PREVIEW_COLUMNS, SWATCH_SIZE,
};

#[derive(Parser)]
#[command(name = "mapart")]
#[command(version)]
#[command(about = "Dither images into palette-restricted map art")]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither one or more images onto a grid of 128x128 maps
    Dither {
        /// Input images (png, jpg, jpeg, bmp, tiff, gif)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output PNG path (single input only; default <stem>_dithered.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for generated files (default: next to each input)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Maps across, 1 to 8
        #[arg(short = 'W', long)]
        map_width: Option<usize>,

        /// Maps down, 1 to 8
        #[arg(short = 'H', long)]
        map_height: Option<usize>,

        /// Require inputs to already match the map canvas
        #[arg(long)]
        no_resize: bool,

        /// Also write <stem>_original.png and <stem>_quantized.png
        #[arg(long)]
        comparison: bool,

        /// Also write one <stem>_map_<index>.png per map, row by row
        #[arg(long)]
        tiles: bool,

        /// Palette file (.act, .png or .txt; default: Minecraft carpet colors)
        #[arg(short, long)]
        palette: Option<PathBuf>,

        /// Per-channel cap on each diffused error share
        #[arg(long)]
        error_clamp: Option<f32>,

        /// YAML config file (default: $MAPART_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Worker threads for multiple inputs (default: one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },
    /// Show the active palette
    Palette {
        /// Palette file (.act, .png or .txt; default: Minecraft carpet colors)
        #[arg(short, long)]
        palette: Option<PathBuf>,

        /// Write a swatch image of the palette
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Print palette information as JSON
        #[arg(long)]
        json: bool,
    },
    /// Extract the colors of a palette file into a hex list
    Extract {
        /// Palette file (.act, .png or .txt)
        file: PathBuf,

        /// Output hex list
        #[arg(short, long, default_value = "extracted_colors.txt")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Dither {
            inputs,
            output,
            out_dir,
            map_width,
            map_height,
            no_resize,
            comparison,
            tiles,
            palette,
            error_clamp,
            config,
            jobs,
        } => {
            let mut config =
                AppConfig::load(config.as_deref()).context("Failed to load config")?;
            if let Some(w) = map_width {
                config.map_width = w;
            }
            if let Some(h) = map_height {
                config.map_height = h;
            }
            if no_resize {
                config.resize = false;
            }
            config.comparison |= comparison;
            config.tiles |= tiles;
            if palette.is_some() {
                config.palette = palette;
            }
            if let Some(clamp) = error_clamp {
                config.error_clamp = clamp;
            }
            if out_dir.is_some() {
                config.out_dir = out_dir;
            }
            run_dither_command(inputs, output, &config, jobs)
        }
        Commands::Palette {
            palette,
            preview,
            json,
        } => run_palette_command(palette, preview, json),
        Commands::Extract { file, output } => run_extract_command(&file, &output),
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet { "mapart=warn" } else { "mapart=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Dither every input, continuing past failures
fn run_dither_command(
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    config: &AppConfig,
    threads: Option<usize>,
) -> anyhow::Result<()> {
    if output.is_some() && inputs.len() > 1 {
        bail!("--output can only be used with a single input; use --out-dir instead");
    }

    let settings = JobSettings::from_config(config).context("Invalid map settings")?;
    let palette = load_palette(config.palette.as_deref()).context("Failed to load palette")?;

    let out_dir = config.out_dir.as_deref();
    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut output = output;
    let jobs: Vec<DitherJob> = inputs
        .into_iter()
        .map(|input| DitherJob::new(input, output.take(), out_dir))
        .collect();

    let results = run_batch(&jobs, &palette, &settings, threads)?;

    let mut failed = 0;
    for (job, result) in jobs.iter().zip(results) {
        match result.with_context(|| format!("Failed to dither {}", job.input.display())) {
            Ok(report) => {
                tracing::info!(
                    input = %report.input.display(),
                    width = report.canvas_size.0,
                    height = report.canvas_size.1,
                    seconds = report.elapsed.as_secs_f32(),
                    "Dithered"
                );
            }
            Err(e) => {
                failed += 1;
                tracing::error!("{e:#}");
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", jobs.len());
    }
    Ok(())
}

fn run_palette_command(
    palette_path: Option<PathBuf>,
    preview: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let palette = load_palette(palette_path.as_deref()).context("Failed to load palette")?;
    let info = PaletteInfo::new(&palette);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "{} colors, {} in {}",
            info.color_count, info.algorithm, info.color_space
        );
        for (i, color) in info.colors.iter().enumerate() {
            println!("  {:>3}: {color}", i + 1);
        }
    }

    if let Some(path) = preview {
        let image = palette_preview(&palette, PREVIEW_COLUMNS, SWATCH_SIZE)?;
        save_png(&path, &image)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved palette preview");
    }
    Ok(())
}

fn run_extract_command(file: &Path, output: &Path) -> anyhow::Result<()> {
    let extracted = extract_colors(file)
        .with_context(|| format!("Failed to extract colors from {}", file.display()))?;

    write_hex_list(output, &extracted.colors)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        source = %file.display(),
        colors = extracted.colors.len(),
        duplicates_removed = extracted.duplicates_removed,
        output = %output.display(),
        "Extracted palette"
    );
    Ok(())
}
