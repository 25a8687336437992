//! Directory listing
//!
//! Builds the listing rows returned with most actions and computes the
//! aggregate size of everything stored under the root.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::StorageError;
use crate::storage::results::{FOLDER_TYPE, FileEntry, UNKNOWN_TYPE};

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lists the entries of `path` in filesystem enumeration order.
///
/// When `is_subdirectory` is set a synthetic `..` row is appended.
pub fn list_directory(path: &Path, is_subdirectory: bool) -> Result<Vec<FileEntry>, StorageError> {
    let entries = fs::read_dir(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::NotADirectory => {
            StorageError::DirectoryNotFound(path.display().to_string())
        }
        _ => StorageError::Io(e),
    })?;

    let mut files = Vec::new();

    for entry in entries {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().to_string();

        // stat follows symlinks, so a link to a folder lists as a folder
        let row = match fs::metadata(entry.path()) {
            Ok(metadata) => describe(filename, &metadata),
            Err(e) => {
                warn!("Failed to stat {}: {}", entry.path().display(), e);
                FileEntry {
                    filetype: guess_filetype(&filename),
                    filename,
                    size: 0.0,
                    created: String::new(),
                    is_folder: false,
                }
            }
        };

        debug!("Listed {} ({} KB)", row.filename, row.size);
        files.push(row);
    }

    if is_subdirectory {
        files.push(FileEntry::parent_link());
    }

    info!("Listed directory {} - {} entries", path.display(), files.len());

    Ok(files)
}

/// Recursive sum of regular file sizes under `root`.
///
/// Unreadable entries are skipped; a missing root counts as empty.
pub fn total_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Bytes to kilobytes (1000 bytes), rounded to two decimals
pub fn size_in_kilobytes(bytes: u64) -> f64 {
    (bytes as f64 / 10.0).round() / 100.0
}

fn describe(filename: String, metadata: &Metadata) -> FileEntry {
    let is_folder = metadata.is_dir();

    FileEntry {
        size: if is_folder {
            0.0
        } else {
            size_in_kilobytes(metadata.len())
        },
        created: format_created(metadata),
        filetype: if is_folder {
            FOLDER_TYPE.to_string()
        } else {
            guess_filetype(&filename)
        },
        filename,
        is_folder,
    }
}

/// Top-level MIME category guessed from the extension
fn guess_filetype(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first()
        .map(|mime| mime.type_().as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
}

fn format_created(metadata: &Metadata) -> String {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(|time| DateTime::<Local>::from(time).format(CREATED_FORMAT).to_string())
        .unwrap_or_default()
}
