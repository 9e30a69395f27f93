//! Error handlers
//!
//! Logs operation failures at a level matching who was at fault.

use crate::error::types::StorageError;
use log::{error, warn};

/// Log a failed file operation.
///
/// Rejected requests are a client's problem and go to `warn`; OS and
/// configuration failures are ours and go to `error` with the source chain.
pub fn report_failure(operation: &str, err: &StorageError) {
    if err.is_client_error() {
        warn!("{} rejected: {}", operation, err);
    } else {
        match std::error::Error::source(err) {
            Some(source) => error!("{} failed: {} ({:?})", operation, err, source),
            None => error!("{} failed: {}", operation, err),
        }
    }
}
