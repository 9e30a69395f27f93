//! Request handlers
//!
//! Each handler unpacks its request, runs the file operation on the blocking
//! pool, and wraps the outcome in an [`ApiResponse`].

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use log::warn;

use crate::api::requests::{
    AppendRequest, CreateDirRequest, CreateFileRequest, DeleteRequest, PathQuery, RenameRequest,
    SearchQuery,
};
use crate::api::responses::{
    ApiResponse, BrowsePayload, ContentPayload, NoPayload, SearchPayload, current_path_display,
};
use crate::api::routes::AppState;
use crate::error::{StorageError, StorageResult, report_failure};
use crate::storage::{EntryKind, FileOperations};

type Reply<T> = Json<ApiResponse<T>>;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn browse(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Reply<BrowsePayload> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("browse", rejection.body_text()),
    };

    let result = run(&state, "browse", move |ops| {
        let listing = ops.list(&query.path)?;
        let display = ops.resolver().display_path(&listing.directory);
        Ok((listing.entries, display))
    })
    .await;

    reply(result, |(items, display)| {
        ApiResponse::ok(BrowsePayload {
            items,
            current_path_display: current_path_display(&state.root_label, &display),
        })
    })
}

pub async fn get_file_content(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Reply<ContentPayload> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("read", rejection.body_text()),
    };

    let result = run(&state, "read", move |ops| ops.read(&query.path)).await;
    reply(result, |content| ApiResponse::ok(ContentPayload { content }))
}

pub async fn create_dir(
    State(state): State<AppState>,
    body: Result<Json<CreateDirRequest>, JsonRejection>,
) -> Reply<NoPayload> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return reject("create directory", rejection.body_text()),
    };

    let result = run(&state, "create directory", move |ops| {
        let target = ops.create_directory(&request.path, &request.name)?;
        Ok(file_name(&target))
    })
    .await;

    reply(result, |name| {
        ApiResponse::message(format!("Directory '{}' created successfully", name))
    })
}

pub async fn create_file(
    State(state): State<AppState>,
    body: Result<Json<CreateFileRequest>, JsonRejection>,
) -> Reply<NoPayload> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return reject("create file", rejection.body_text()),
    };

    let result = run(&state, "create file", move |ops| {
        let target = ops.create_file(&request.path, &request.name, &request.content)?;
        Ok(file_name(&target))
    })
    .await;

    reply(result, |name| {
        ApiResponse::message(format!("File '{}' created successfully", name))
    })
}

pub async fn append_file(
    State(state): State<AppState>,
    body: Result<Json<AppendRequest>, JsonRejection>,
) -> Reply<NoPayload> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return reject("append", rejection.body_text()),
    };

    let name = base_name(&request.path).to_string();
    let result = run(&state, "append", move |ops| {
        ops.append(&request.path, &request.content)
    })
    .await;

    reply(result, |()| {
        ApiResponse::message(format!("Content appended to '{}' successfully", name))
    })
}

pub async fn delete_item(
    State(state): State<AppState>,
    body: Result<Json<DeleteRequest>, JsonRejection>,
) -> Reply<NoPayload> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return reject("delete", rejection.body_text()),
    };

    let name = base_name(&request.path).to_string();
    let result = run(&state, "delete", move |ops| ops.delete(&request.path)).await;

    reply(result, |kind| {
        ApiResponse::message(match kind {
            EntryKind::Directory => {
                format!("Directory '{}' and its contents deleted successfully", name)
            }
            EntryKind::File | EntryKind::Other => format!("File '{}' deleted successfully", name),
        })
    })
}

pub async fn rename_item(
    State(state): State<AppState>,
    body: Result<Json<RenameRequest>, JsonRejection>,
) -> Reply<NoPayload> {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return reject("rename", rejection.body_text()),
    };

    let old_name = base_name(&request.old_path).to_string();
    let result = run(&state, "rename", move |ops| {
        let target = ops.rename(&request.old_path, &request.new_name)?;
        Ok(file_name(&target))
    })
    .await;

    reply(result, |new_name| {
        ApiResponse::message(format!(
            "Renamed \"{}\" to \"{}\" successfully",
            old_name, new_name
        ))
    })
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Reply<SearchPayload> {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return reject("search", rejection.body_text()),
    };

    let result = run(&state, "search", move |ops| ops.search(&query.path, &query.term)).await;

    reply(result, |found| {
        ApiResponse::ok_with_message(
            format!(
                "Found {} results for \"{}\"",
                found.entries.len(),
                found.term
            ),
            SearchPayload {
                results: found.entries,
                search_term: found.term,
            },
        )
    })
}

/// Run a blocking file operation off the async workers and log failures.
async fn run<T, F>(state: &AppState, operation: &'static str, task: F) -> StorageResult<T>
where
    T: Send + 'static,
    F: FnOnce(&FileOperations) -> StorageResult<T> + Send + 'static,
{
    let operations = state.operations.clone();
    let result = match tokio::task::spawn_blocking(move || task(operations.as_ref())).await {
        Ok(result) => result,
        Err(join_error) => Err(StorageError::TaskFailed(join_error.to_string())),
    };

    if let Err(err) = &result {
        report_failure(operation, err);
    }
    result
}

fn reply<T, P>(result: StorageResult<T>, on_success: impl FnOnce(T) -> ApiResponse<P>) -> Reply<P> {
    match result {
        Ok(value) => Json(on_success(value)),
        Err(err) => Json(ApiResponse::failure(&err)),
    }
}

fn reject<P>(operation: &str, message: String) -> Reply<P> {
    warn!("{} request rejected: {}", operation, message);
    Json(ApiResponse::rejected(message))
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Last segment of a client path, for messages
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
