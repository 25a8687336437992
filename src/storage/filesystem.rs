//! File system operations
//!
//! Thin wrappers over `std::fs` used by the action handlers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::info;
use std::fs;
use std::io::{ErrorKind, Result};
use std::path::Path;

use crate::error::StorageError;

/// Create a directory and any missing parents; existing directories are fine
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

/// Check if something (file, folder or link) exists at `path`
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Write `content` to `path`, replacing any existing file
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content)?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Remove a file or an empty directory.
///
/// Returns `false` when nothing exists at `path`. Non-empty directories are
/// not removed.
pub fn remove_entry(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if metadata.is_dir() {
        fs::remove_dir(path)?;
    } else {
        fs::remove_file(path)?;
    }

    info!("Deleted {}", path.display());
    Ok(true)
}

/// Read a file as a `data:;base64,` URI, or `None` if it does not exist
pub fn read_data_uri(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(format!("data:;base64,{}", STANDARD.encode(bytes)))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Rename `from` to `to`, refusing to replace an existing destination
pub fn rename_entry(
    from: &Path,
    to: &Path,
    from_name: &str,
    to_name: &str,
) -> std::result::Result<(), StorageError> {
    if !entry_exists(from) {
        return Err(StorageError::FileNotFound(from_name.to_string()));
    }

    if entry_exists(to) {
        return Err(StorageError::AlreadyExists(to_name.to_string()));
    }

    fs::rename(from, to)?;
    info!("Renamed {} to {}", from.display(), to.display());
    Ok(())
}
