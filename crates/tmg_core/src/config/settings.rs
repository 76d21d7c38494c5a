//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Generated media parameters.
    #[serde(default)]
    pub media: MediaSettings,

    /// Download sources for ffmpeg and the font.
    #[serde(default)]
    pub downloads: DownloadSettings,
}

/// Identifies a config section for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Logging,
    Media,
    Downloads,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Logging,
        ConfigSection::Media,
        ConfigSection::Downloads,
    ];

    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Media => "media",
            ConfigSection::Downloads => "downloads",
        }
    }

    /// Comment written above the section in a freshly generated file.
    pub(super) fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Output, tools and logs directories (empty = current directory)",
            ConfigSection::Logging => "Logging configuration",
            ConfigSection::Media => "Generated media parameters",
            ConfigSection::Downloads => "Download sources (empty ffmpeg_url = platform default)",
        }
    }
}

/// Path configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder generated media is written to. Empty means the working directory.
    #[serde(default)]
    pub output_folder: String,

    /// Folder the ffmpeg executable is looked up in and installed to.
    /// Empty means the working directory.
    #[serde(default)]
    pub tools_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last CSV loaded in the GUI.
    #[serde(default)]
    pub last_csv_path: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: String::new(),
            tools_folder: String::new(),
            logs_folder: default_logs_folder(),
            last_csv_path: String::new(),
        }
    }
}

impl PathSettings {
    /// Resolve the output folder, falling back to `cwd` when unset.
    pub fn output_dir(&self, cwd: &Path) -> PathBuf {
        resolve_or(&self.output_folder, cwd)
    }

    /// Resolve the tools folder, falling back to `cwd` when unset.
    pub fn tools_dir(&self, cwd: &Path) -> PathBuf {
        resolve_or(&self.tools_folder, cwd)
    }
}

fn resolve_or(value: &str, fallback: &Path) -> PathBuf {
    if value.trim().is_empty() {
        fallback.to_path_buf()
    } else {
        PathBuf::from(value)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default)]
    pub level: LogLevel,
}

/// Parameters of the generated media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Frame rate of the synthetic color source for videos.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Overlay font size in points.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

fn default_frame_rate() -> u32 {
    25
}

fn default_font_size() -> u32 {
    32
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            font_size: default_font_size(),
        }
    }
}

/// Download sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Override for the ffmpeg archive URL. Must end in `.zip` or `.tar.xz`.
    #[serde(default)]
    pub ffmpeg_url: String,

    /// URL of the overlay font.
    #[serde(default = "default_font_url")]
    pub font_url: String,
}

fn default_font_url() -> String {
    crate::tools::font::DEFAULT_FONT_URL.to_string()
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            ffmpeg_url: String::new(),
            font_url: default_font_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_folders_resolve_to_cwd() {
        let paths = PathSettings::default();
        let cwd = Path::new("/work");
        assert_eq!(paths.output_dir(cwd), PathBuf::from("/work"));
        assert_eq!(paths.tools_dir(cwd), PathBuf::from("/work"));
    }

    #[test]
    fn configured_folder_wins() {
        let paths = PathSettings {
            output_folder: "/media/out".to_string(),
            ..Default::default()
        };
        assert_eq!(paths.output_dir(Path::new("/work")), PathBuf::from("/media/out"));
    }

    #[test]
    fn missing_sections_get_defaults() {
        let settings: Settings = toml::from_str("[media]\nframe_rate = 30\n").unwrap();
        assert_eq!(settings.media.frame_rate, 30);
        assert_eq!(settings.media.font_size, 32);
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert!(settings.downloads.font_url.ends_with("Ubuntu-Regular.ttf"));
    }
}
