use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "MAPART_CONFIG";

/// How a source image is fitted onto the map canvas.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Scale to fit inside the canvas and pad with black.
    #[default]
    Contain,
    /// Scale to fill the canvas and crop the overflow.
    Cover,
}

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Maps across (1..=8)
    #[serde(default = "default_map_size")]
    pub map_width: usize,

    /// Maps down (1..=8)
    #[serde(default = "default_map_size")]
    pub map_height: usize,

    /// Resize sources to the map canvas
    #[serde(default = "default_true")]
    pub resize: bool,

    #[serde(default)]
    pub resize_mode: ResizeMode,

    /// Allow enlarging sources smaller than the canvas
    #[serde(default)]
    pub upscale: bool,

    /// Per-channel cap on each diffused error share
    #[serde(default = "default_error_clamp")]
    pub error_clamp: f32,

    /// Rows between progress log lines
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// Also write the resized original and the plain quantization
    #[serde(default)]
    pub comparison: bool,

    /// Also write one PNG per 128x128 map
    #[serde(default)]
    pub tiles: bool,

    /// Palette file (ACT, PNG or TXT); the built-in carpet palette when absent
    #[serde(default)]
    pub palette: Option<PathBuf>,

    /// Directory for generated files; next to the input when absent
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
}

fn default_map_size() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_error_clamp() -> f32 {
    mapart_dither::dither::DEFAULT_ERROR_CLAMP
}

fn default_progress_interval() -> usize {
    mapart_dither::dither::DEFAULT_PROGRESS_INTERVAL
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load from an explicit `path`, falling back to `$MAPART_CONFIG`, then
    /// defaults.
    ///
    /// An explicit path that cannot be read or parsed is an error. A broken
    /// `$MAPART_CONFIG` file is logged and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
            return Ok(Self::default());
        };
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(%e, env = CONFIG_ENV, "Ignoring config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse one YAML file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        tracing::info!(
            path = %path.display(),
            map_width = config.map_width,
            map_height = config.map_height,
            "Loaded configuration"
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_width: default_map_size(),
            map_height: default_map_size(),
            resize: true,
            resize_mode: ResizeMode::Contain,
            upscale: false,
            error_clamp: default_error_clamp(),
            progress_interval: default_progress_interval(),
            comparison: false,
            tiles: false,
            palette: None,
            out_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.map_width, 1);
        assert_eq!(config.map_height, 1);
        assert!(config.resize);
        assert_eq!(config.resize_mode, ResizeMode::Contain);
        assert!(!config.upscale);
        assert_eq!(config.error_clamp, 32.0);
        assert_eq!(config.progress_interval, 8);
        assert!(!config.comparison);
        assert!(!config.tiles);
        assert!(config.palette.is_none());
        assert!(config.out_dir.is_none());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let yaml = "map_width: 3\nresize_mode: cover\ntiles: true\npalette: wool.txt\n";
        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.map_width, 3);
        assert_eq!(config.map_height, 1);
        assert_eq!(config.resize_mode, ResizeMode::Cover);
        assert!(config.tiles);
        assert_eq!(config.palette, Some(PathBuf::from("wool.txt")));
        assert!(config.resize);
    }

    #[test]
    fn test_unknown_resize_mode_rejected() {
        let err = AppConfig::from_yaml_str("resize_mode: stretch\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "map_height: 2\nerror_clamp: 16.5").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.map_height, 2);
        assert_eq!(config.error_clamp, 16.5);
    }

    #[test]
    fn test_load_unparsable_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "map_width: [not, a, number]").unwrap();

        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("Config error: cannot read "));
    }
}
