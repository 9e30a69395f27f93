use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

use rax_file_manager::api::{AppState, router};
use rax_file_manager::sandbox::SandboxRoot;
use rax_file_manager::storage::FileOperations;

// Helper to build the app over a fresh sandbox
fn setup() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let root = SandboxRoot::new(tmp.path().join("data"), true).unwrap();
    let state = AppState::new(FileOperations::new(root), "data");
    (tmp, router(state))
}

async fn read_json(response: axum::response::Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn get(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post(app: &Router, uri: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

#[tokio::test]
async fn test_health() {
    let (_tmp, app) = setup();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_browse_root_lists_directories_first() {
    let (_tmp, app) = setup();
    post(&app, "/api/create_file", json!({"path": "", "name": "a.txt", "content": ""})).await;
    post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;

    let json = get(&app, "/api/browse?path=").await;
    assert_eq!(json["success"], true);
    assert_eq!(json["current_path_display"], "data/");
    assert_eq!(
        json["items"],
        json!([
            {"name": "docs", "path": "docs", "is_dir": true, "is_file": false},
            {"name": "a.txt", "path": "a.txt", "is_dir": false, "is_file": true}
        ])
    );
}

#[tokio::test]
async fn test_browse_without_query_defaults_to_root() {
    let (_tmp, app) = setup();
    let json = get(&app, "/api/browse").await;
    assert_eq!(json["success"], true);
    assert_eq!(json["items"], json!([]));
}

#[tokio::test]
async fn test_browse_subdirectory_display() {
    let (_tmp, app) = setup();
    post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;

    let json = get(&app, "/api/browse?path=docs").await;
    assert_eq!(json["current_path_display"], "data/docs/");

    let json = get(&app, "/api/browse?path=missing").await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("Not found"));
}

#[tokio::test]
async fn test_create_append_read_flow() {
    let (_tmp, app) = setup();

    let json = post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;
    assert_eq!(json, json!({"success": true, "message": "Directory 'docs' created successfully"}));

    let json = post(
        &app,
        "/api/create_file",
        json!({"path": "docs", "name": "a.txt", "content": "hello"}),
    )
    .await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "File 'a.txt' created successfully");

    let json = post(&app, "/api/append_file", json!({"path": "docs/a.txt", "content": "world"})).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Content appended to 'a.txt' successfully");

    let json = get(&app, "/api/get-file-content?path=docs/a.txt").await;
    assert_eq!(json, json!({"success": true, "content": "hello\nworld"}));
}

#[tokio::test]
async fn test_create_file_conflict_keeps_content() {
    let (_tmp, app) = setup();
    post(&app, "/api/create_file", json!({"path": "", "name": "a.txt", "content": "keep"})).await;

    let json = post(
        &app,
        "/api/create_file",
        json!({"path": "", "name": "a.txt", "content": "clobber"}),
    )
    .await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("already exists"));

    let json = get(&app, "/api/get-file-content?path=a.txt").await;
    assert_eq!(json["content"], "keep");
}

#[tokio::test]
async fn test_missing_name_is_reported() {
    let (_tmp, app) = setup();
    let json = post(&app, "/api/create_dir", json!({"path": ""})).await;
    assert_eq!(json, json!({"success": false, "message": "Name is required"}));
}

#[tokio::test]
async fn test_malformed_json_is_a_failure_envelope() {
    let (_tmp, app) = setup();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/delete")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_delete_root_is_forbidden() {
    let (tmp, app) = setup();
    post(&app, "/api/create_file", json!({"path": "", "name": "a.txt", "content": "x"})).await;

    for path in ["", ".", "/", "docs/.."] {
        let json = post(&app, "/api/delete", json!({"path": path})).await;
        assert_eq!(
            json,
            json!({"success": false, "message": "Cannot delete the root directory"})
        );
    }
    assert!(tmp.path().join("data").join("a.txt").exists());
}

#[tokio::test]
async fn test_delete_directory_recursively() {
    let (tmp, app) = setup();
    post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;
    post(&app, "/api/create_file", json!({"path": "docs", "name": "a.txt", "content": "x"})).await;

    let json = post(&app, "/api/delete", json!({"path": "docs"})).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Directory 'docs' and its contents deleted successfully"
    );
    assert!(!tmp.path().join("data").join("docs").exists());

    let json = post(&app, "/api/delete", json!({"path": "docs"})).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_rename_within_directory_only() {
    let (_tmp, app) = setup();
    post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;
    post(&app, "/api/create_dir", json!({"path": "", "name": "other"})).await;
    post(&app, "/api/create_file", json!({"path": "docs", "name": "a.txt", "content": "x"})).await;

    let json = post(
        &app,
        "/api/rename_item",
        json!({"oldPath": "docs/a.txt", "newName": "../other/a.txt"}),
    )
    .await;
    assert_eq!(json["success"], false);

    let json = post(
        &app,
        "/api/rename_item",
        json!({"oldPath": "docs/a.txt", "newName": "b.txt"}),
    )
    .await;
    assert_eq!(
        json,
        json!({"success": true, "message": "Renamed \"a.txt\" to \"b.txt\" successfully"})
    );

    let json = get(&app, "/api/browse?path=docs").await;
    assert_eq!(json["items"][0]["path"], "docs/b.txt");
}

#[tokio::test]
async fn test_search_from_root() {
    let (_tmp, app) = setup();
    post(&app, "/api/create_dir", json!({"path": "", "name": "docs"})).await;
    post(&app, "/api/create_file", json!({"path": "", "name": "a.txt", "content": ""})).await;

    let json = get(&app, "/api/search?term=DOC&path=").await;
    assert_eq!(json["success"], true);
    assert_eq!(json["search_term"], "doc");
    assert_eq!(json["message"], "Found 1 results for \"doc\"");
    assert_eq!(
        json["results"],
        json!([{"name": "docs", "path": "docs", "is_dir": true, "is_file": false}])
    );

    let json = get(&app, "/api/search?path=").await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_traversal_is_rejected_on_every_route() {
    let (tmp, app) = setup();
    fs::write(tmp.path().join("secret.txt"), "top secret").unwrap();

    for uri in [
        "/api/browse?path=..",
        "/api/get-file-content?path=../secret.txt",
        "/api/get-file-content?path=..%2F..%2Fetc%2Fpasswd",
        "/api/search?term=secret&path=..",
    ] {
        let json = get(&app, uri).await;
        assert_eq!(json["success"], false, "{uri}");
        assert!(
            json["message"].as_str().unwrap().starts_with("Invalid path"),
            "{uri}"
        );
    }

    let json = post(&app, "/api/delete", json!({"path": "../secret.txt"})).await;
    assert_eq!(json["success"], false);
    let json = post(
        &app,
        "/api/create_file",
        json!({"path": "..", "name": "evil.txt", "content": ""}),
    )
    .await;
    assert_eq!(json["success"], false);
    let json = post(
        &app,
        "/api/append_file",
        json!({"path": "../secret.txt", "content": "pwned"}),
    )
    .await;
    assert_eq!(json["success"], false);

    assert_eq!(
        fs::read_to_string(tmp.path().join("secret.txt")).unwrap(),
        "top secret"
    );
    assert!(!tmp.path().join("evil.txt").exists());
}

#[tokio::test]
async fn test_sibling_prefix_directory_is_unreachable() {
    let (tmp, app) = setup();
    fs::create_dir(tmp.path().join("data-evil")).unwrap();
    fs::write(tmp.path().join("data-evil").join("loot.txt"), "loot").unwrap();

    let json = get(&app, "/api/get-file-content?path=../data-evil/loot.txt").await;
    assert_eq!(json["success"], false);
}
