//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging for the endpoint.
///
/// Honours `RUST_LOG`, defaulting to `info`. Logs go to stderr, leaving
/// stdout for the response body.
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();
}
