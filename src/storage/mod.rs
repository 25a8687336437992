//! File system storage management
//!
//! Upload validation, directory listings and the filesystem primitives the
//! action handlers are built from.

pub mod filesystem;
pub mod listing;
pub mod results;
pub mod validation;

pub use listing::{list_directory, size_in_kilobytes, total_size};
pub use results::FileEntry;
pub use validation::{check_file_size, check_file_type, check_total_size, validate_upload};
