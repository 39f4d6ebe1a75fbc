pub mod batch;
pub mod image_io;
pub mod palette_loader;
pub mod pipeline;
pub mod preview;
pub mod resizer;

pub use batch::{check_unique_outputs, run_batch, run_batch_with_cancel};
pub use image_io::{encode_png, is_supported_format, load_rgb, save_png, SUPPORTED_EXTENSIONS};
pub use palette_loader::{
    builtin_palette, extract_colors, load_palette, write_hex_list, ExtractedColors, PaletteFormat,
    CARPET_COLORS,
};
pub use pipeline::{process, DitherJob, JobReport, JobSettings};
pub use preview::{palette_preview, PaletteInfo, PREVIEW_COLUMNS, SWATCH_SIZE};
pub use resizer::LanczosFit;
