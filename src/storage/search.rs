//! Recursive name search

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{StorageError, StorageResult};
use crate::storage::operations::FileOperations;
use crate::storage::results::{ListingEntry, SearchResults, sort_entries};

impl FileOperations {
    /// Finds every file and directory below `start_path` whose name contains
    /// `term`, ignoring case.
    ///
    /// Symbolic links are reported but never followed. Subtrees that cannot be
    /// read are skipped.
    pub fn search(&self, start_path: &str, term: &str) -> StorageResult<SearchResults> {
        if term.is_empty() {
            return Err(StorageError::EmptyInput("Search term"));
        }
        let needle = term.to_lowercase();

        let start = self.resolver().resolve(start_path)?;
        if self.inspect(&start)?.is_none() {
            return Err(StorageError::NotFound(self.shown(&start)));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&start).min_depth(1).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("Skipping unreadable entry while searching: {}", err);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy();
            if name.to_lowercase().contains(&needle) {
                entries.push(ListingEntry::new(
                    name.into_owned(),
                    self.resolver().display_path(entry.path()),
                    entry.file_type().into(),
                ));
            }
        }
        sort_entries(&mut entries);

        debug!(
            "Search for '{}' under {} found {} entries",
            needle,
            self.shown(&start),
            entries.len()
        );

        Ok(SearchResults {
            term: needle,
            entries,
        })
    }
}
