//! Configuration management for Test Media Generator.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//!
//! # Example
//!
//! ```no_run
//! use tmg_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Frame rate: {}", config.settings().media.frame_rate);
//!
//! config.settings_mut().paths.last_csv_path = "formats.csv".to_string();
//! config.update_section(ConfigSection::Paths).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, DownloadSettings, LoggingSettings, MediaSettings, PathSettings, Settings,
};

use std::path::PathBuf;

/// Default config path: `.config/settings.toml` relative to the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}
