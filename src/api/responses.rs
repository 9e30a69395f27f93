//! Response envelope
//!
//! Shapes `{success, message?, ...payload}` bodies.

use serde::Serialize;

use crate::error::StorageError;
use crate::storage::ListingEntry;

/// Uniform envelope for every API response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload: Some(payload),
        }
    }

    pub fn ok_with_message(message: impl Into<String>, payload: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload: Some(payload),
        }
    }

    pub fn failure(err: &StorageError) -> Self {
        Self::rejected(err.to_string())
    }

    /// Failure for requests that never reached a file operation
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: None,
        }
    }
}

impl ApiResponse<NoPayload> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::ok_with_message(message, NoPayload {})
    }
}

/// Payload of responses that only carry a message
#[derive(Debug, Serialize)]
pub struct NoPayload {}

#[derive(Debug, Serialize)]
pub struct BrowsePayload {
    pub items: Vec<ListingEntry>,
    pub current_path_display: String,
}

#[derive(Debug, Serialize)]
pub struct ContentPayload {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SearchPayload {
    pub results: Vec<ListingEntry>,
    pub search_term: String,
}

/// Browse header text: `data/` for the root, `data/docs/` below it.
pub fn current_path_display(root_label: &str, display_path: &str) -> String {
    if display_path.is_empty() {
        format!("{}/", root_label)
    } else {
        format!("{}/{}/", root_label, display_path)
    }
}
