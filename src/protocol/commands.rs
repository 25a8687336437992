//! Module `commands`
//!
//! Defines the inbound request model: the closed set of tasks and the
//! fields each task reads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

use crate::error::StorageError;

/// Represents the action a request asks for.
///
/// Unrecognized names map to `Unknown` rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    List,
    Upload,
    Download,
    Delete,
    CreateFolder,
    RenameFile,
    Unknown(String),
}

impl Task {
    pub fn from_name(name: &str) -> Self {
        match name {
            "list" => Task::List,
            "upload" => Task::Upload,
            "download" => Task::Download,
            "delete" => Task::Delete,
            "create_folder" => Task::CreateFolder,
            "rename_file" => Task::RenameFile,
            other => Task::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Task::List => "list",
            Task::Upload => "upload",
            Task::Download => "download",
            Task::Delete => "delete",
            Task::CreateFolder => "create_folder",
            Task::RenameFile => "rename_file",
            Task::Unknown(name) => name,
        }
    }
}

/// A single JSON request body
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ActionRequest {
    #[serde(default)]
    pub task: String,
    /// Working directory relative to the upload root
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub files: Vec<RequestFile>,
    #[serde(default)]
    pub foldername: Option<String>,
    #[serde(default)]
    pub old_filename: Option<String>,
    #[serde(default)]
    pub new_filename: Option<String>,
}

impl ActionRequest {
    pub fn task(&self) -> Task {
        Task::from_name(&self.task)
    }
}

/// An element of `files`: a bare filename, or an upload object
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestFile {
    Name(String),
    Upload(UploadItem),
}

/// A file carried inline by an upload request.
///
/// `filesize` and `filetype` are declared by the client and only used for the
/// validation pre-checks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UploadItem {
    #[serde(default)]
    pub filename: String,
    /// Base64 payload, optionally prefixed `data:<mime>;base64,`
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub filesize: u64,
    #[serde(default)]
    pub filetype: String,
}

impl UploadItem {
    /// Decode the payload into the bytes to write
    pub fn decode_content(&self) -> Result<Vec<u8>, StorageError> {
        let encoded = match self.content.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => self.content.as_str(),
        };

        STANDARD
            .decode(encoded.trim())
            .map_err(|source| StorageError::Decode {
                filename: self.filename.clone(),
                source,
            })
    }
}
