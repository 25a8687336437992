//! Transports
//!
//! The endpoint runs either as a one-shot CGI program or as a small HTTP
//! server. Both hand the request body to the same dispatcher.

pub mod cgi;
pub mod core;

pub use self::core::{Server, router};

use log::{info, warn};

use crate::config::EndpointConfig;

/// Ensure the upload root exists before serving requests
pub fn prepare_root(config: &EndpointConfig) {
    if let Err(e) = std::fs::create_dir_all(config.root()) {
        warn!("Failed to create upload root {}: {}", config.root().display(), e);
    } else {
        info!("Upload root: {}", config.root().display());
    }
}
