//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::Serialize;
use std::path::PathBuf;

use crate::storage::filesystem::EntryKind;

/// One child of a directory listing or one search hit.
///
/// `path` is sandbox-relative with forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "is_dir")]
    pub is_directory: bool,
    pub is_file: bool,
}

impl ListingEntry {
    pub fn new(name: String, path: String, kind: EntryKind) -> Self {
        Self {
            name,
            path,
            is_directory: kind == EntryKind::Directory,
            is_file: kind == EntryKind::File,
        }
    }
}

/// Directories first, then everything else, each group by case-insensitive name.
pub fn sort_entries(entries: &mut [ListingEntry]) {
    entries.sort_by_cached_key(|entry| (!entry.is_directory, entry.name.to_lowercase()));
}

/// Result of a directory listing operation
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub directory: PathBuf,
    pub entries: Vec<ListingEntry>,
}

/// Result of a recursive name search
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Lowercased term the names were matched against
    pub term: String,
    pub entries: Vec<ListingEntry>,
}
