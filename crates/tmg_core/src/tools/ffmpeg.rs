//! ffmpeg locator and installer.
//!
//! Looks for the executable in the install directory (the working directory
//! by default). When it is missing, downloads the platform archive to a
//! temporary file, extracts just the executable and returns its path.

use std::path::{Path, PathBuf};

use super::archive::extract_executable;
use super::download::download_to_writer;
use super::platform::{self, DownloadSource};
use super::{InstallError, InstallProgress};

/// Entry names accepted when scanning an archive.
const ARCHIVE_NAMES: &[&str] = &["ffmpeg", "ffmpeg.exe"];

/// A located ffmpeg executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegBinary {
    path: PathBuf,
}

impl FfmpegBinary {
    /// Wrap a known executable path without checking it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Locates ffmpeg in a directory, installing it there if absent.
#[derive(Debug, Clone)]
pub struct FfmpegInstaller {
    install_dir: PathBuf,
    url_override: Option<String>,
    client: reqwest::Client,
}

impl FfmpegInstaller {
    /// Installer rooted at `install_dir`.
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            url_override: None,
            client: reqwest::Client::new(),
        }
    }

    /// Download from `url` instead of the platform default. Empty means default.
    pub fn with_download_url(mut self, url: &str) -> Self {
        let url = url.trim();
        self.url_override = if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        };
        self
    }

    /// Expected location of the executable.
    pub fn expected_path(&self) -> PathBuf {
        self.install_dir.join(platform::executable_name())
    }

    /// Return the executable if it is already installed.
    pub fn locate(&self) -> Option<FfmpegBinary> {
        let path = self.expected_path();
        path.is_file().then(|| FfmpegBinary::new(path))
    }

    /// Return the installed executable, downloading it first if needed.
    ///
    /// Calling this again after a successful install finds the file and
    /// returns without network access.
    pub async fn ensure_present(
        &self,
        progress: impl Fn(InstallProgress),
    ) -> Result<FfmpegBinary, InstallError> {
        if let Some(binary) = self.locate() {
            tracing::debug!("ffmpeg found at {}", binary.path().display());
            progress(InstallProgress::Ready {
                what: "ffmpeg".to_string(),
            });
            return Ok(binary);
        }

        let source = self.source()?;
        tracing::info!("ffmpeg not found in {}, installing", self.install_dir.display());

        let path = self.install(&source, &progress).await?;
        progress(InstallProgress::Ready {
            what: "ffmpeg".to_string(),
        });
        Ok(FfmpegBinary::new(path))
    }

    fn source(&self) -> Result<DownloadSource, InstallError> {
        match &self.url_override {
            Some(url) => DownloadSource::from_url(url.clone()),
            None => platform::default_source(),
        }
    }

    async fn install(
        &self,
        source: &DownloadSource,
        progress: &impl Fn(InstallProgress),
    ) -> Result<PathBuf, InstallError> {
        let mut archive = tempfile::Builder::new()
            .prefix("ffmpeg-download-")
            .suffix(source.format.extension())
            .tempfile()
            .map_err(|e| InstallError::io("creating temporary download file", e))?;

        progress(InstallProgress::Downloading {
            what: "ffmpeg".to_string(),
            percent: 0,
        });
        download_to_writer(&self.client, &source.url, archive.as_file_mut(), |percent| {
            progress(InstallProgress::Downloading {
                what: "ffmpeg".to_string(),
                percent,
            })
        })
        .await?;

        progress(InstallProgress::Extracting);
        let reader = archive
            .reopen()
            .map_err(|e| InstallError::io("reopening downloaded archive", e))?;

        // The temporary archive is removed when `archive` drops
        extract_executable(
            reader,
            source.format,
            ARCHIVE_NAMES,
            &self.install_dir,
            &source.url,
        )
    }
}
