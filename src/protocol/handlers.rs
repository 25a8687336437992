//! Action handlers module for filedesk.
//!
//! This module defines one handler per task. Each resolves its working
//! directory under the upload root, performs its filesystem work in request
//! order and builds the result, attaching a fresh listing where the task
//! reports one.

use log::{info, warn};

use crate::config::EndpointConfig;
use crate::error::{EndpointError, ProtocolError, error_to_result};
use crate::navigate::{ResolvedDir, resolve_directory, resolve_entry};
use crate::protocol::{
    ActionRequest, ActionResult, DownloadedFile, RequestFile, Task, UploadItem, parse_request,
};
use crate::storage::filesystem::{
    create_directory, read_data_uri, remove_entry, rename_entry, write_file,
};
use crate::storage::{FileEntry, list_directory, total_size, validate_upload};

type HandlerResult = Result<ActionResult, EndpointError>;

/// Parses a raw body and dispatches it. Never fails: every problem becomes an
/// error result.
pub fn handle_body(config: &EndpointConfig, body: Option<&[u8]>) -> ActionResult {
    match parse_request(body) {
        Ok(request) => handle_request(config, &request),
        Err(e) => error_to_result(&EndpointError::from(e)),
    }
}

/// Dispatches a parsed request to its handler.
///
/// # Arguments
///
/// * `config` - Endpoint configuration (root, limits, allow-list).
/// * `request` - The parsed request.
///
/// # Returns
///
/// * `ActionResult` - Outcome of the task, success or error.
pub fn handle_request(config: &EndpointConfig, request: &ActionRequest) -> ActionResult {
    let task = request.task();
    info!("Handling task '{}' in dir {:?}", task.name(), request.dir);

    let outcome = match &task {
        Task::List => handle_list(config, request),
        Task::Upload => handle_upload(config, request),
        Task::Download => handle_download(config, request),
        Task::Delete => handle_delete(config, request),
        Task::CreateFolder => handle_create_folder(config, request),
        Task::RenameFile => handle_rename_file(config, request),
        Task::Unknown(name) => Err(ProtocolError::UnknownTask(name.clone()).into()),
    };

    outcome.unwrap_or_else(|e| error_to_result(&e))
}

/// Handles `list`: the directory's entries plus the aggregate size.
fn handle_list(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;
    let files = current_listing(&dir)?;

    Ok(ActionResult::success("Directory listed successfully.")
        .with_listing(files)
        .with_total_size(total_size(config.root()), config.max_total_size))
}

/// Handles `upload`: validates and writes each item in order.
///
/// The first validation failure stops the batch. Items written before it
/// stay on disk.
fn handle_upload(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;
    let items = upload_items(request)?;

    for item in items {
        if let Err(e) = validate_upload(config, &item.filename, item.filesize, &item.filetype) {
            warn!("Upload of {} rejected: {}", item.filename, e);
            let result = ActionResult::error(e.to_string());
            return Ok(match current_listing(&dir) {
                Ok(files) => result.with_listing(files),
                Err(_) => result,
            });
        }

        let path = resolve_entry(config.root(), &dir, &item.filename)?;
        let content = item.decode_content()?;
        write_file(&path, &content)?;
    }

    Ok(ActionResult::success("File(s) uploaded successfully.")
        .with_listing(current_listing(&dir)?)
        .with_total_size(total_size(config.root()), config.max_total_size))
}

/// Handles `delete`: removes files and empty folders; absent names are skipped.
fn handle_delete(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;

    for name in filenames(request, "delete")? {
        let path = resolve_entry(config.root(), &dir, name)?;
        if !remove_entry(&path)? {
            info!("Nothing to delete at {}", path.display());
        }
    }

    Ok(ActionResult::success("File(s) deleted successfully.").with_listing(current_listing(&dir)?))
}

/// Handles `download`: returns each existing file as a data URI. Never lists.
fn handle_download(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;
    let mut downloaded = Vec::new();

    for name in filenames(request, "download")? {
        let path = resolve_entry(config.root(), &dir, name)?;
        match read_data_uri(&path)? {
            Some(content) => downloaded.push(DownloadedFile {
                filename: name.to_string(),
                content,
            }),
            None => info!("Skipping missing download {}", path.display()),
        }
    }

    Ok(ActionResult::success("File(s) downloaded successfully.").with_downloads(downloaded))
}

/// Handles `create_folder`; creating an existing folder succeeds.
fn handle_create_folder(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;
    let foldername = required(&request.foldername, "foldername")?;

    let path = resolve_entry(config.root(), &dir, foldername)?;
    create_directory(&path)?;
    info!("Created folder {}", path.display());

    Ok(ActionResult::success(format!("Folder {foldername} created successfully."))
        .with_listing(current_listing(&dir)?)
        .with_total_size(total_size(config.root()), config.max_total_size))
}

/// Handles `rename_file` within the working directory.
fn handle_rename_file(config: &EndpointConfig, request: &ActionRequest) -> HandlerResult {
    let dir = working_dir(config, request)?;
    let old_filename = required(&request.old_filename, "old_filename")?;
    let new_filename = required(&request.new_filename, "new_filename")?;

    let from = resolve_entry(config.root(), &dir, old_filename)?;
    let to = resolve_entry(config.root(), &dir, new_filename)?;
    rename_entry(&from, &to, old_filename, new_filename)?;

    Ok(
        ActionResult::success(format!(
            "File {old_filename} renamed to {new_filename} successfully."
        ))
        .with_listing(current_listing(&dir)?),
    )
}

fn working_dir(
    config: &EndpointConfig,
    request: &ActionRequest,
) -> Result<ResolvedDir, EndpointError> {
    Ok(resolve_directory(config.root(), request.dir.as_deref())?)
}

fn current_listing(dir: &ResolvedDir) -> Result<Vec<FileEntry>, EndpointError> {
    Ok(list_directory(dir.path(), dir.is_subdirectory())?)
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ProtocolError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ProtocolError::MissingField(field)),
    }
}

/// The bare filenames in `files`; upload objects are a shape error.
fn filenames<'a>(
    request: &'a ActionRequest,
    task: &'static str,
) -> Result<Vec<&'a str>, ProtocolError> {
    request
        .files
        .iter()
        .map(|file| match file {
            RequestFile::Name(name) => Ok(name.as_str()),
            RequestFile::Upload(_) => Err(ProtocolError::WrongFileShape {
                task,
                expected: "filenames",
            }),
        })
        .collect()
}

fn upload_items(request: &ActionRequest) -> Result<Vec<&UploadItem>, ProtocolError> {
    request
        .files
        .iter()
        .map(|file| match file {
            RequestFile::Upload(item) => Ok(item),
            RequestFile::Name(_) => Err(ProtocolError::WrongFileShape {
                task: "upload",
                expected: "upload objects",
            }),
        })
        .collect()
}
