//! External tool provisioning.
//!
//! Media jobs need two things on disk before they can run:
//! - the `ffmpeg` executable ([`FfmpegInstaller`])
//! - the TrueType font used by the text overlay ([`FontInstaller`])
//!
//! Both installers check for an existing file first and only touch the
//! network when it is missing. Downloads are single-attempt and unverified.
//! The resolved paths are bundled into a [`Toolchain`] and passed explicitly
//! to every job.

pub mod archive;
pub mod download;
pub mod ffmpeg;
pub mod font;
pub mod platform;

#[cfg(test)]
pub(crate) mod test_server;

pub use ffmpeg::{FfmpegBinary, FfmpegInstaller};
pub use font::FontInstaller;
pub use platform::{ArchiveFormat, DownloadSource};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::DownloadSettings;

/// Errors raised while locating or installing external tools.
#[derive(Error, Debug)]
pub enum InstallError {
    /// No download is known for this operating system.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Transport failure or non-success HTTP status.
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// The downloaded archive could not be read.
    #[error("Failed to extract {archive}: {message}")]
    Extract { archive: String, message: String },

    /// The archive did not contain the expected file.
    #[error("{name} not found in {archive}")]
    AssetMissing { name: String, archive: String },

    /// Local file system failure.
    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    pub(crate) fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    pub(crate) fn extract(archive: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extract {
            archive: archive.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Progress updates while provisioning tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    /// Fetching a file; `percent` is 0 when the size is unknown.
    Downloading { what: String, percent: u8 },
    /// Unpacking the ffmpeg archive.
    Extracting,
    /// The tool is available.
    Ready { what: String },
}

/// Resolved paths every media job needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub ffmpeg: FfmpegBinary,
    pub font: PathBuf,
}

impl Toolchain {
    pub fn new(ffmpeg: FfmpegBinary, font: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg,
            font: font.into(),
        }
    }

    /// Ensure the font (in `font_dir`) and ffmpeg (in `tools_dir`) exist,
    /// installing whichever is missing.
    ///
    /// The font is handled first so a missing font is reported before the
    /// much larger ffmpeg download starts.
    pub async fn prepare(
        downloads: &DownloadSettings,
        tools_dir: &Path,
        font_dir: &Path,
        progress: impl Fn(InstallProgress),
    ) -> Result<Self, InstallError> {
        let font = FontInstaller::new()
            .with_url(&downloads.font_url)
            .ensure(font_dir, &progress)
            .await?;

        let ffmpeg = FfmpegInstaller::new(tools_dir)
            .with_download_url(&downloads.ffmpeg_url)
            .ensure_present(&progress)
            .await?;

        Ok(Self::new(ffmpeg, font))
    }
}
