//! filedesk - a JSON file-management endpoint
//!
//! Lists, uploads, downloads, deletes, renames and creates folders inside a
//! single configured upload directory, one request at a time.

pub mod config;
pub mod error;
pub mod navigate;
pub mod protocol;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::EndpointConfig;
pub use protocol::{ActionRequest, ActionResult, handle_body, handle_request};
pub use server::Server;
