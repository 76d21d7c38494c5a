//! Helper functions for handler modules.

use std::path::Path;

use percent_encoding::percent_decode_str;

/// Clean up a file URL (from drag-drop or paste) to a regular path.
///
/// Takes the first non-comment line of a `text/uri-list` payload and strips
/// the `file://` scheme, percent-decoding what remains.
pub fn clean_file_url(url: &str) -> String {
    let first_uri = url
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");

    let path = match first_uri.strip_prefix("file://") {
        Some(rest) => percent_decode_str(rest).decode_utf8_lossy().to_string(),
        None => first_uri.to_string(),
    };

    path.trim().to_string()
}

/// Whether `path` has a `.csv` extension (exact, lowercase).
pub fn is_csv_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}
