//! File system inspection
//!
//! Classifies paths without following symbolic links.

use std::fs::{self, FileType};
use std::io::{ErrorKind, Result};
use std::path::Path;

/// What a sandboxed path currently points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl From<FileType> for EntryKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Inspect a path; `Ok(None)` when nothing exists there.
pub fn entry_kind(path: &Path) -> Result<Option<EntryKind>> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(Some(metadata.file_type().into())),
        // NotADirectory: some component along the way is a regular file.
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check if a regular file exists
pub fn file_exists(path: &Path) -> bool {
    matches!(entry_kind(path), Ok(Some(EntryKind::File)))
}

/// Check if a directory exists
pub fn directory_exists(path: &Path) -> bool {
    matches!(entry_kind(path), Ok(Some(EntryKind::Directory)))
}
