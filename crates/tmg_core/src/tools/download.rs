//! Streaming HTTP download.

use std::io::Write;

use futures_util::StreamExt;

use super::InstallError;

/// Fetch `url` with a single GET and stream the body into `writer`.
///
/// `progress` receives a percentage whenever the server announced a
/// content length. Returns the number of bytes written.
pub async fn download_to_writer<W: Write>(
    client: &reqwest::Client,
    url: &str,
    writer: &mut W,
    progress: impl Fn(u8),
) -> Result<u64, InstallError> {
    tracing::info!("Downloading {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| InstallError::download(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(InstallError::download(
            url,
            format!("HTTP {}", response.status()),
        ));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| InstallError::download(url, e.to_string()))?;
        writer
            .write_all(&chunk)
            .map_err(|e| InstallError::io("writing download", e))?;
        downloaded += chunk.len() as u64;

        if total_size > 0 {
            let percent = ((downloaded as f64 / total_size as f64) * 100.0).min(100.0) as u8;
            progress(percent);
        }
    }

    writer
        .flush()
        .map_err(|e| InstallError::io("writing download", e))?;

    tracing::debug!("Downloaded {} bytes from {}", downloaded, url);
    Ok(downloaded)
}
