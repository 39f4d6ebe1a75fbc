pub mod config;

pub use config::{AppConfig, ResizeMode, CONFIG_ENV};
