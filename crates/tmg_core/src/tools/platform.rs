//! Platform-specific ffmpeg distribution selection.

use super::InstallError;

/// ffmpeg release pinned for the macOS build.
pub const FFMPEG_VERSION: &str = "4.4.1";

const LINUX_URL: &str =
    "https://johnvansickle.com/ffmpeg/releases/ffmpeg-release-amd64-static.tar.xz";
const WINDOWS_URL: &str = "https://www.gyan.dev/ffmpeg/builds/ffmpeg-release-essentials.zip";

/// Archive container of a downloaded distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// xz-compressed tarball.
    TarXz,
    /// Zip archive.
    Zip,
}

impl ArchiveFormat {
    /// Infer the format from a URL or file name suffix.
    pub fn from_url(url: &str) -> Option<Self> {
        let lower = url.to_ascii_lowercase();
        if lower.ends_with(".tar.xz") {
            Some(ArchiveFormat::TarXz)
        } else if lower.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else {
            None
        }
    }

    /// File suffix including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarXz => ".tar.xz",
            ArchiveFormat::Zip => ".zip",
        }
    }
}

/// Where to fetch ffmpeg from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSource {
    pub url: String,
    pub format: ArchiveFormat,
}

impl DownloadSource {
    /// Build a source from an explicit URL.
    pub fn from_url(url: impl Into<String>) -> Result<Self, InstallError> {
        let url = url.into();
        let format = ArchiveFormat::from_url(&url).ok_or_else(|| InstallError::Download {
            url: url.clone(),
            message: "unrecognized archive type (expected .zip or .tar.xz)".to_string(),
        })?;
        Ok(Self { url, format })
    }
}

/// Default ffmpeg download for the current operating system.
pub fn default_source() -> Result<DownloadSource, InstallError> {
    source_for_os(std::env::consts::OS)
}

/// ffmpeg download for the named operating system (`std::env::consts::OS` values).
pub fn source_for_os(os: &str) -> Result<DownloadSource, InstallError> {
    let (url, format) = match os {
        "linux" => (LINUX_URL.to_string(), ArchiveFormat::TarXz),
        "macos" => (
            format!("https://evermeet.cx/ffmpeg/ffmpeg-{}.zip", FFMPEG_VERSION),
            ArchiveFormat::Zip,
        ),
        "windows" => (WINDOWS_URL.to_string(), ArchiveFormat::Zip),
        other => return Err(InstallError::UnsupportedPlatform(other.to_string())),
    };
    Ok(DownloadSource { url, format })
}

/// Name of the ffmpeg executable on this platform.
pub fn executable_name() -> &'static str {
    if cfg!(windows) {
        "ffmpeg.exe"
    } else {
        "ffmpeg"
    }
}
