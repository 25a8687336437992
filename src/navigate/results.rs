//! Result types for navigate operations

use std::path::{Path, PathBuf};

/// A working directory resolved under the upload root
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDir {
    /// Absolute location on disk
    pub path: PathBuf,
    /// Normalized location relative to the root; empty for the root itself
    pub relative: PathBuf,
}

impl ResolvedDir {
    /// True when the directory is strictly below the root
    pub fn is_subdirectory(&self) -> bool {
        !self.relative.as_os_str().is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
