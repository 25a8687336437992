//! Error handling
//!
//! Defines error types and the boundary translator into error results.

pub mod handlers;
pub mod types;

pub use handlers::error_to_result;
pub use types::*;
