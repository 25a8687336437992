//! Request parsing

use crate::error::ProtocolError;
use crate::protocol::ActionRequest;

/// Parses a request body into an [`ActionRequest`].
///
/// A missing or blank body is an empty request, whose task resolves to
/// unknown.
pub fn parse_request(body: Option<&[u8]>) -> Result<ActionRequest, ProtocolError> {
    match body {
        Some(bytes) if !bytes.trim_ascii().is_empty() => {
            serde_json::from_slice(bytes).map_err(ProtocolError::InvalidJson)
        }
        _ => Ok(ActionRequest::default()),
    }
}
