//! Storage result types
//!
//! Defines the listing record returned by directory listings.

use serde::Serialize;

/// Filetype reported for directories
pub const FOLDER_TYPE: &str = "folder";

/// Filetype reported when no MIME guess is available
pub const UNKNOWN_TYPE: &str = "unknown";

/// One row of a directory listing
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileEntry {
    pub filename: String,
    /// Size in kilobytes (1000 bytes), two decimals; 0 for folders
    pub size: f64,
    /// `YYYY-MM-DD HH:MM:SS`, empty for synthetic entries
    pub created: String,
    pub filetype: String,
    #[serde(rename = "isFolder")]
    pub is_folder: bool,
}

impl FileEntry {
    /// The synthetic `..` row appended to subdirectory listings
    pub fn parent_link() -> Self {
        Self {
            filename: "..".to_string(),
            size: 0.0,
            created: String::new(),
            filetype: FOLDER_TYPE.to_string(),
            is_folder: true,
        }
    }
}
