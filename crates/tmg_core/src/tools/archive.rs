//! Single-file extraction from tar.xz and zip archives.
//!
//! Only the first regular file whose final path component matches one of
//! the requested names is written out; everything else in the archive is
//! skipped. The entry is unpacked into a temporary file next to its final
//! location and renamed into place only once it is complete.

use std::fs;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

use super::platform::ArchiveFormat;
use super::InstallError;

/// Extract the first entry named like one of `names` into `dest_dir`.
///
/// The file keeps its own name (e.g. `ffmpeg` or `ffmpeg.exe`) and is made
/// executable on Unix. `label` is only used in error messages.
pub fn extract_executable<R: Read + Seek>(
    reader: R,
    format: ArchiveFormat,
    names: &[&str],
    dest_dir: &Path,
    label: &str,
) -> Result<PathBuf, InstallError> {
    tracing::info!("Extracting {} from {}", names.join(" / "), label);

    let extracted = match format {
        ArchiveFormat::TarXz => extract_from_tar_xz(reader, names, dest_dir, label)?,
        ArchiveFormat::Zip => extract_from_zip(reader, names, dest_dir, label)?,
    };

    match extracted {
        Some(path) => {
            tracing::info!("Extracted to {}", path.display());
            Ok(path)
        }
        None => Err(InstallError::AssetMissing {
            name: names.join(" / "),
            archive: label.to_string(),
        }),
    }
}

fn extract_from_tar_xz<R: Read>(
    reader: R,
    names: &[&str],
    dest_dir: &Path,
    label: &str,
) -> Result<Option<PathBuf>, InstallError> {
    let decoder = xz2::read::XzDecoder::new(reader);
    let mut archive = tar::Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| InstallError::extract(label, e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| InstallError::extract(label, e.to_string()))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let entry_path = entry
            .path()
            .map_err(|e| InstallError::extract(label, e.to_string()))?
            .to_string_lossy()
            .to_string();

        if let Some(file_name) = matching_name(&entry_path, names) {
            let out_path = dest_dir.join(file_name);
            let expected = entry.header().size().ok();
            write_executable(&mut entry, expected, dest_dir, &out_path, label)?;
            return Ok(Some(out_path));
        }
    }

    Ok(None)
}

fn extract_from_zip<R: Read + Seek>(
    reader: R,
    names: &[&str],
    dest_dir: &Path,
    label: &str,
) -> Result<Option<PathBuf>, InstallError> {
    let mut archive =
        zip::ZipArchive::new(reader).map_err(|e| InstallError::extract(label, e.to_string()))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| InstallError::extract(label, e.to_string()))?;
        if !entry.is_file() {
            continue;
        }

        let entry_name = entry.name().to_string();
        if let Some(file_name) = matching_name(&entry_name, names) {
            let out_path = dest_dir.join(file_name);
            let expected = Some(entry.size());
            write_executable(&mut entry, expected, dest_dir, &out_path, label)?;
            return Ok(Some(out_path));
        }
    }

    Ok(None)
}

/// Final path component of `entry_name` if it is one of `names`.
fn matching_name<'a>(entry_name: &str, names: &[&'a str]) -> Option<&'a str> {
    let normalized = entry_name.replace('\\', "/");
    let file_name = normalized.rsplit('/').next().unwrap_or("");
    names.iter().copied().find(|name| *name == file_name)
}

/// Copy one archive entry to `out_path`.
///
/// Read failures and short entries are `Extract` errors; nothing is left at
/// `out_path` unless the full entry was written.
fn write_executable<R: Read>(
    reader: &mut R,
    expected: Option<u64>,
    dest_dir: &Path,
    out_path: &Path,
    label: &str,
) -> Result<(), InstallError> {
    let mut temp = tempfile::Builder::new()
        .prefix(".ffmpeg-extract-")
        .tempfile_in(dest_dir)
        .map_err(|e| InstallError::io("creating executable", e))?;

    let mut buffer = vec![0u8; 64 * 1024];
    let mut written: u64 = 0;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(InstallError::extract(label, e.to_string())),
        };
        temp.write_all(&buffer[..n])
            .map_err(|e| InstallError::io("extracting executable", e))?;
        written += n as u64;
    }

    if let Some(expected) = expected {
        if written != expected {
            return Err(InstallError::extract(
                label,
                format!("entry truncated ({} of {} bytes)", written, expected),
            ));
        }
    }

    temp.as_file()
        .sync_all()
        .map_err(|e| InstallError::io("extracting executable", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o755))
            .map_err(|e| InstallError::io("setting executable permissions", e))?;
    }

    temp.persist(out_path)
        .map_err(|e| InstallError::io("saving executable", e.error))?;

    Ok(())
}
