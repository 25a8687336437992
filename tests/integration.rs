use std::fs;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use filedesk::protocol::Status;
use filedesk::server::router;
use filedesk::{EndpointConfig, handle_body};

// Helper to build a config rooted in a fresh temporary directory
fn setup_test_env() -> (TempDir, EndpointConfig) {
    let temp_dir = TempDir::new().unwrap();
    let config = EndpointConfig {
        upload_dir: temp_dir.path().to_path_buf(),
        ..EndpointConfig::default()
    };
    (temp_dir, config)
}

// Helper to send a JSON request through the dispatcher and read the JSON back
fn send(config: &EndpointConfig, request: Value) -> Value {
    let body = serde_json::to_vec(&request).unwrap();
    let result = handle_body(config, Some(&body));
    serde_json::from_str(&result.to_json()).unwrap()
}

fn filenames(response: &Value) -> Vec<String> {
    let mut names: Vec<String> = response["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_upload_then_delete_scenario() {
    let (_temp_dir, config) = setup_test_env();

    let response = send(
        &config,
        json!({
            "task": "upload",
            "files": [{"filename": "a.txt", "content": "aGk=", "filesize": 2, "filetype": "text/plain"}]
        }),
    );
    assert_eq!(response["status"], "success");
    let files = response["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "a.txt");
    assert_eq!(files[0]["size"], 0.0);
    assert_eq!(files[0]["filetype"], "text");
    assert_eq!(files[0]["isFolder"], false);
    assert_eq!(response["totalSize"], json!([2, 104857600]));

    let response = send(&config, json!({"task": "delete", "files": ["a.txt"]}));
    assert_eq!(response["status"], "success");
    assert_eq!(response["files"], json!([]));
}

#[test]
fn test_upload_download_round_trip() {
    let (_temp_dir, config) = setup_test_env();
    let payload = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    let response = send(
        &config,
        json!({
            "task": "upload",
            "files": [{"filename": "dot.png", "content": payload, "filesize": 70, "filetype": "image/png"}]
        }),
    );
    assert_eq!(response["status"], "success");

    let response = send(&config, json!({"task": "download", "files": ["dot.png"]}));
    assert_eq!(response["status"], "success");
    assert!(response.get("totalSize").is_none());
    assert_eq!(
        response["files"][0]["content"],
        format!("data:;base64,{payload}")
    );
}

#[test]
fn test_listing_size_matches_decoded_length() {
    let (_temp_dir, config) = setup_test_env();
    // 3000 bytes of 'a'
    let content = "YWFh".repeat(1000);

    let response = send(
        &config,
        json!({
            "task": "upload",
            "files": [{"filename": "big.txt", "content": content, "filesize": 3000, "filetype": "text/plain"}]
        }),
    );

    assert_eq!(response["status"], "success");
    assert_eq!(response["files"][0]["size"], 3.0);
}

#[test]
fn test_subdirectory_workflow() {
    let (temp_dir, config) = setup_test_env();

    let response = send(&config, json!({"task": "create_folder", "foldername": "docs"}));
    assert_eq!(response["status"], "success");
    assert_eq!(response["files"][0]["filetype"], "folder");
    assert_eq!(response["files"][0]["size"], 0.0);

    let response = send(
        &config,
        json!({
            "task": "upload",
            "dir": "docs",
            "files": [{"filename": "note.txt", "content": "aGk=", "filesize": 2, "filetype": "text/plain"}]
        }),
    );
    assert_eq!(response["status"], "success");
    assert_eq!(filenames(&response), vec!["..", "note.txt"]);
    assert!(temp_dir.path().join("docs/note.txt").exists());

    let response = send(
        &config,
        json!({"task": "rename_file", "dir": "docs", "old_filename": "note.txt", "new_filename": "memo.txt"}),
    );
    assert_eq!(response["status"], "success");
    assert_eq!(filenames(&response), vec!["..", "memo.txt"]);

    // Aggregate size covers the whole root, not just the listed directory
    let response = send(&config, json!({"task": "list"}));
    assert_eq!(filenames(&response), vec!["docs"]);
    assert_eq!(response["totalSize"][0], 2);

    let response = send(&config, json!({"task": "delete", "files": ["docs"]}));
    assert_eq!(response["status"], "error");
    assert!(temp_dir.path().join("docs/memo.txt").exists());
}

#[test]
fn test_parent_link_only_for_subdirectories() {
    let (temp_dir, config) = setup_test_env();
    fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();

    for (dir, expect_parent) in [("", false), ("a", true), ("a/b", true), ("a/b/..", true), ("a/..", false)] {
        let response = send(&config, json!({"task": "list", "dir": dir}));
        let parents = filenames(&response).iter().filter(|n| *n == "..").count();
        assert_eq!(parents, usize::from(expect_parent), "dir {dir:?}");
    }
}

#[test]
fn test_path_containment() {
    let (_temp_dir, config) = setup_test_env();

    for dir in ["../../etc", "..", "/etc"] {
        let response = send(&config, json!({"task": "list", "dir": dir}));
        assert_eq!(response["status"], "error", "dir {dir:?}");
        assert!(response.get("files").is_none());
    }

    let response = send(&config, json!({"task": "download", "files": ["../../etc/passwd"]}));
    assert_eq!(response["status"], "error");
}

#[test]
fn test_quota_rejects_first_item() {
    let (temp_dir, mut config) = setup_test_env();
    config.max_total_size = 4;
    fs::write(temp_dir.path().join("existing.bin"), vec![0u8; 5]).unwrap();

    let response = send(
        &config,
        json!({
            "task": "upload",
            "files": [
                {"filename": "a.txt", "content": "aGk=", "filesize": 2, "filetype": "text/plain"},
                {"filename": "b.txt", "content": "aGk=", "filesize": 2, "filetype": "text/plain"}
            ]
        }),
    );

    assert_eq!(response["status"], "error");
    assert_eq!(filenames(&response), vec!["existing.bin"]);
    assert!(!temp_dir.path().join("a.txt").exists());
    assert!(!temp_dir.path().join("b.txt").exists());
}

#[test]
fn test_disallowed_type_with_defaults() {
    let (_temp_dir, config) = setup_test_env();

    let response = send(
        &config,
        json!({
            "task": "upload",
            "files": [{"filename": "x", "content": "aGk=", "filesize": 2, "filetype": "application/x-evil"}]
        }),
    );

    assert_eq!(response["status"], "error");
    assert!(response["message"].as_str().unwrap().contains("is not allowed"));
}

#[test]
fn test_unknown_and_malformed_requests() {
    let (_temp_dir, config) = setup_test_env();

    let response = send(&config, json!({"task": "format_disk"}));
    assert_eq!(response["status"], "error");
    assert_eq!(response["message"], "Invalid task: format_disk");

    let result = handle_body(&config, Some(b"{\"task\": "));
    assert_eq!(result.status, Status::Error);
    assert_eq!(result.message, "Invalid JSON payload");
}

#[tokio::test]
async fn test_http_post_dispatches() {
    let (_temp_dir, config) = setup_test_env();
    let app = router(Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"task": "list"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["files"], json!([]));
}

#[tokio::test]
async fn test_http_get_is_unknown_task() {
    let (_temp_dir, config) = setup_test_env();
    let app = router(Arc::new(config));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Invalid task: ");
}

#[tokio::test]
async fn test_http_cors_preflight() {
    let (_temp_dir, config) = setup_test_env();
    let app = router(Arc::new(config));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
