//! HTTP API
//!
//! JSON endpoints under `/api` wrapping the file operations. Every response is
//! `200 OK` carrying a `success` flag; failures carry a human-readable `message`.

pub mod handlers;
pub mod requests;
pub mod responses;
mod routes;

pub use responses::ApiResponse;
pub use routes::{AppState, router};
