//! Overlay font installer.

use std::path::{Path, PathBuf};

use super::download::download_to_writer;
use super::{InstallError, InstallProgress};

/// File name of the overlay font.
pub const FONT_FILE_NAME: &str = "Ubuntu-Regular.ttf";

/// Default download location of the overlay font.
pub const DEFAULT_FONT_URL: &str =
    "https://github.com/google/fonts/raw/main/ufl/ubuntu/Ubuntu-Regular.ttf";

/// Ensures the overlay font exists in a directory.
#[derive(Debug, Clone)]
pub struct FontInstaller {
    url: String,
    client: reqwest::Client,
}

impl Default for FontInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl FontInstaller {
    pub fn new() -> Self {
        Self {
            url: DEFAULT_FONT_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Download from `url` instead of the default. Empty keeps the default.
    pub fn with_url(mut self, url: &str) -> Self {
        if !url.trim().is_empty() {
            self.url = url.trim().to_string();
        }
        self
    }

    /// Where the font is expected inside `dir`.
    pub fn expected_path(dir: &Path) -> PathBuf {
        dir.join(FONT_FILE_NAME)
    }

    /// Return the font path in `dir`, downloading the font if it is missing.
    ///
    /// The download goes to a sibling temporary file that is renamed into
    /// place, so a failed download never leaves a truncated font behind.
    pub async fn ensure(
        &self,
        dir: &Path,
        progress: impl Fn(InstallProgress),
    ) -> Result<PathBuf, InstallError> {
        let font_path = Self::expected_path(dir);
        if font_path.exists() {
            tracing::debug!("Font found at {}", font_path.display());
            return Ok(font_path);
        }

        tracing::info!("Downloading {}...", FONT_FILE_NAME);
        let mut temp = tempfile::Builder::new()
            .prefix(".font-download-")
            .tempfile_in(dir)
            .map_err(|e| InstallError::io("creating font file", e))?;

        download_to_writer(&self.client, &self.url, temp.as_file_mut(), |percent| {
            progress(InstallProgress::Downloading {
                what: FONT_FILE_NAME.to_string(),
                percent,
            })
        })
        .await?;

        temp.persist(&font_path)
            .map_err(|e| InstallError::io("saving font file", e.error))?;

        tracing::info!("Font downloaded successfully.");
        progress(InstallProgress::Ready {
            what: FONT_FILE_NAME.to_string(),
        });
        Ok(font_path)
    }
}
