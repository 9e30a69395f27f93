//! Router assembly

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers;
use crate::middleware::logging::log_request;
use crate::storage::FileOperations;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub operations: Arc<FileOperations>,
    pub root_label: Arc<str>,
}

impl AppState {
    pub fn new(operations: FileOperations, root_label: &str) -> Self {
        Self {
            operations: Arc::new(operations),
            root_label: Arc::from(root_label),
        }
    }
}

/// Build the HTTP router with request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/browse", get(handlers::browse))
        .route("/api/get-file-content", get(handlers::get_file_content))
        .route("/api/create_dir", post(handlers::create_dir))
        .route("/api/create_file", post(handlers::create_file))
        .route("/api/append_file", post(handlers::append_file))
        .route("/api/delete", post(handlers::delete_item))
        .route("/api/rename_item", post(handlers::rename_item))
        .route("/api/search", get(handlers::search))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
