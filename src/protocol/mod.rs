//! Request/response protocol
//!
//! Handles request parsing, task dispatch and the JSON result model.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{ActionRequest, RequestFile, Task, UploadItem};
pub use handlers::{handle_body, handle_request};
pub use parser::parse_request;
pub use responses::{ActionResult, DownloadedFile, ResultFiles, Status};
