//! Configuration management for filedesk
//!
//! The endpoint reads a per-user JSON settings file once at startup. Any key
//! missing from the file (or the file itself) falls back to its default, and
//! `FILEDESK_*` environment variables override file values. File keys are
//! case-insensitive: `UPLOAD_DIR` and `upload_dir` name the same setting.

use config::{Config, Environment, File, FileFormat, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override file settings
pub const ENV_PREFIX: &str = "FILEDESK";

/// Name of the settings file looked up in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".filedesk.json";

/// Immutable endpoint configuration, constructed once per process
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EndpointConfig {
    /// Root directory every action is confined to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Largest single upload accepted, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Largest aggregate size of everything under the root, in bytes
    #[serde(default = "default_max_total_size")]
    pub max_total_size: u64,

    /// MIME types accepted for upload (exact, case-sensitive match)
    #[serde(default = "default_allowed_filetype")]
    pub allowed_filetype: Vec<String>,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("/tmp/uploads/")
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_max_total_size() -> u64 {
    100 * 1024 * 1024
}

fn default_allowed_filetype() -> Vec<String> {
    [
        "image/png",
        "image/jpeg",
        "image/jpg",
        "image/gif",
        "application/pdf",
        "text/plain",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_file_size: default_max_file_size(),
            max_total_size: default_max_total_size(),
            allowed_filetype: default_allowed_filetype(),
        }
    }
}

impl EndpointConfig {
    /// Load configuration from a JSON file with environment overrides.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Like [`EndpointConfig::load`], reading overrides from `<prefix>_*`.
    pub fn load_with_prefix(path: &Path, prefix: &str) -> Result<Self, config::ConfigError> {
        let file = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .build()?;

        // File values become defaults under lowercase keys, so an env
        // variable for the same setting replaces them instead of clashing.
        let mut builder = Config::builder();
        for (key, value) in file.collect()? {
            builder = builder.set_default(key.to_lowercase(), value)?;
        }

        let settings = builder
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        let config: EndpointConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Default settings file location: `$HOME/.filedesk.json`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE_NAME)
    }

    /// Root directory as a `Path`
    pub fn root(&self) -> &Path {
        &self.upload_dir
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(config::ConfigError::Message(
                "UPLOAD_DIR cannot be empty".into(),
            ));
        }

        if self.max_file_size == 0 {
            return Err(config::ConfigError::Message(
                "MAX_FILE_SIZE must be greater than 0".into(),
            ));
        }

        if self.max_total_size == 0 {
            return Err(config::ConfigError::Message(
                "MAX_TOTAL_SIZE must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
