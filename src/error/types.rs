//! Error types
//!
//! Defines domain-specific error types for each module of the endpoint.

use std::io;
use thiserror::Error;

/// Path resolution errors
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Path escapes upload root: {0}")]
    Traversal(String),

    #[error("Absolute paths are not allowed: {0}")]
    Absolute(String),

    #[error("Invalid path: {0}")]
    Invalid(String),

    #[error("Cannot resolve upload root: {0}")]
    Root(#[source] io::Error),
}

/// Upload validation failures, reported with the current listing attached
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("File {filename} exceeds maximum allowed size of {limit} bytes.")]
    FileTooLarge { filename: String, limit: u64 },

    #[error("File {filename} of type {filetype} is not allowed. Allowed types: {allowed:?}.")]
    TypeNotAllowed {
        filename: String,
        filetype: String,
        allowed: Vec<String>,
    },

    #[error("Cannot store {filename}: total upload size exceeds maximum allowed size of {limit} bytes.")]
    QuotaExceeded { filename: String, limit: u64 },
}

/// Filesystem errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid base64 content for {filename}: {source}")]
    Decode {
        filename: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Request-level errors detected at dispatch
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid JSON payload")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid task: {0}")]
    UnknownTask(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Task {task} expects {expected} in files")]
    WrongFileShape {
        task: &'static str,
        expected: &'static str,
    },
}

/// Umbrella error for everything an action handler can fail with
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<io::Error> for EndpointError {
    fn from(error: io::Error) -> Self {
        EndpointError::Storage(StorageError::Io(error))
    }
}
