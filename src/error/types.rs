//! Error types
//!
//! Defines domain-specific error types for each module of the file manager.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the path resolver refuses a user-supplied path.
///
/// A rejection is always a client error: the request asked for something outside
/// the sandbox or something that cannot be a path at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathRejection {
    #[error("path contains a NUL byte")]
    Malformed,

    #[error("path carries a drive or UNC prefix: {0}")]
    ForeignPrefix(String),

    #[error("path escapes the sandbox root: {0}")]
    Traversal(String),

    #[error("path goes through a symbolic link: {0}")]
    Symlink(String),

    #[error("path resolves outside the sandbox root: {0}")]
    OutsideRoot(String),
}

/// Sandbox root initialization errors
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("sandbox root {path} is unavailable: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("sandbox root {0} is not a directory")]
    RootNotADirectory(PathBuf),
}

/// File operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("{0} is required")]
    EmptyInput(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid parent directory path or parent does not exist: {0}")]
    InvalidParent(String),

    #[error("'{0}' already exists in this location")]
    AlreadyExists(String),

    #[error("Cannot delete the root directory")]
    RootDeletionForbidden,

    #[error("Cannot rename the root directory")]
    RootRenameForbidden,

    #[error("Renaming cannot move '{0}' to another directory")]
    CrossDirectoryMoveForbidden(String),

    #[error("Failed to {action} {path}: {source}")]
    Os {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Operation did not complete: {0}")]
    TaskFailed(String),
}

impl StorageError {
    /// Wraps an OS error with the action and sandbox-relative path it happened on.
    pub fn os(action: &'static str, path: impl Into<String>, source: io::Error) -> Self {
        StorageError::Os {
            action,
            path: path.into(),
            source,
        }
    }

    /// True when the request itself was at fault, as opposed to the server or the disk.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            StorageError::Os { .. } | StorageError::TaskFailed(_)
        )
    }
}

/// Server startup and runtime errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Sandbox error: {0}")]
    Sandbox(#[from] SandboxError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(StorageError::RootDeletionForbidden.is_client_error());
        assert!(StorageError::NotFound("a.txt".into()).is_client_error());
        assert!(StorageError::from(PathRejection::Malformed).is_client_error());

        let os = StorageError::os(
            "read",
            "a.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!os.is_client_error());
        assert_eq!(os.to_string(), "Failed to read a.txt: denied");
    }

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(StorageError::EmptyInput("Name").to_string(), "Name is required");
        assert_eq!(
            StorageError::AlreadyExists("notes.txt".into()).to_string(),
            "'notes.txt' already exists in this location"
        );
        assert_eq!(
            StorageError::from(PathRejection::Traversal("../x".into())).to_string(),
            "Invalid path: path escapes the sandbox root: ../x"
        );
    }
}
