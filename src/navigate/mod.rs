//! Navigate module
//!
//! Maps request-supplied relative paths onto the upload root, rejecting
//! anything that would resolve outside of it.

mod operations;
mod results;

// Re-export public types and functions
pub use operations::{resolve_directory, resolve_entry};
pub use results::ResolvedDir;
