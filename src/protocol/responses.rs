//! Response model
//!
//! Every request produces exactly one [`ActionResult`], serialized as the
//! response body.

use serde::Serialize;

use crate::storage::FileEntry;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// A file returned by the download task
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    /// `data:;base64,<encoded>`
    pub content: String,
}

/// Payload of the `files` field: a listing, or downloaded contents
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResultFiles {
    Listing(Vec<FileEntry>),
    Downloads(Vec<DownloadedFile>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActionResult {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<ResultFiles>,
    /// `[current aggregate bytes, max aggregate bytes]`
    #[serde(rename = "totalSize", skip_serializing_if = "Option::is_none")]
    pub total_size: Option<[u64; 2]>,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            files: None,
            total_size: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            files: None,
            total_size: None,
        }
    }

    pub fn with_listing(mut self, files: Vec<FileEntry>) -> Self {
        self.files = Some(ResultFiles::Listing(files));
        self
    }

    pub fn with_downloads(mut self, files: Vec<DownloadedFile>) -> Self {
        self.files = Some(ResultFiles::Downloads(files));
        self
    }

    pub fn with_total_size(mut self, current: u64, max: u64) -> Self {
        self.total_size = Some([current, max]);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The attached listing, if any
    pub fn listing(&self) -> Option<&[FileEntry]> {
        match &self.files {
            Some(ResultFiles::Listing(files)) => Some(files),
            _ => None,
        }
    }

    /// The downloaded files, if any
    pub fn downloads(&self) -> Option<&[DownloadedFile]> {
        match &self.files {
            Some(ResultFiles::Downloads(files)) => Some(files),
            _ => None,
        }
    }

    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({"status": "error", "message": e.to_string()}).to_string()
        })
    }
}
