//! Page emission.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::validate_page_path;
use crate::error::{Result, SplitterError};

/// Resolve a manifest page path under the output directory.
pub fn page_destination(output_dir: &Path, page_path: &str) -> Result<PathBuf> {
    validate_page_path(page_path)?;
    Ok(output_dir.join(page_path))
}

/// Write a page, creating missing parent directories.
///
/// Uses atomic write pattern: writes to temp file, syncs to disk, then renames.
/// An existing file is replaced as a whole, never appended to.
///
/// # Returns
/// Path of the written page
pub fn write_page(path: &Path, content: &str) -> Result<PathBuf> {
    let wrap = |source: std::io::Error| SplitterError::WritePage {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| SplitterError::InvalidPagePath(path.display().to_string()))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_file = path.with_file_name(temp_name);

    if let Err(e) = write_synced(&temp_file, content) {
        let _ = fs::remove_file(&temp_file);
        return Err(wrap(e));
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(wrap)?;
    }

    fs::rename(&temp_file, path).map_err(wrap)?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Created page");
    Ok(path.to_path_buf())
}

fn write_synced(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
