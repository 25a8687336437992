//! Error handlers
//!
//! Last-resort translation of handler failures into error results.

use crate::error::types::EndpointError;
use crate::protocol::ActionResult;
use log::{error, warn};

/// Convert a failure that escaped an action handler into an error result.
///
/// The message is the error's display text, so system messages reach the
/// caller verbatim.
pub fn error_to_result(err: &EndpointError) -> ActionResult {
    match err {
        EndpointError::Path(e) => warn!("Rejected path: {}", e),
        EndpointError::Protocol(e) => warn!("Protocol error: {}", e),
        EndpointError::Validation(e) => warn!("Validation failed: {}", e),
        EndpointError::Storage(e) => error!("Storage error: {}", e),
    }

    ActionResult::error(err.to_string())
}
