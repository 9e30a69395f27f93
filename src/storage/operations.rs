//! Storage operations
//!
//! Handles the file manager's operations: list, read, create, append, delete and
//! rename. Every path argument goes through the [`PathResolver`] before the
//! filesystem is touched.

use log::{debug, info};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::sandbox::{PathResolver, SandboxRoot};
use crate::storage::filesystem::{EntryKind, directory_exists, entry_kind, file_exists};
use crate::storage::results::{DirectoryListing, ListingEntry, sort_entries};
use crate::utils::validation::{join_relative, require_non_blank};

/// Stateless file operations over one sandbox root.
#[derive(Debug, Clone)]
pub struct FileOperations {
    resolver: PathResolver,
}

impl FileOperations {
    pub fn new(root: SandboxRoot) -> Self {
        Self {
            resolver: PathResolver::new(root),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn root(&self) -> &SandboxRoot {
        self.resolver.root()
    }

    /// Lists the immediate children of a directory
    pub fn list(&self, dir_path: &str) -> StorageResult<DirectoryListing> {
        let directory = self.resolver.resolve(dir_path)?;
        let shown = self.shown(&directory);

        match self.inspect(&directory)? {
            None => return Err(StorageError::NotFound(shown)),
            Some(EntryKind::Directory) => {}
            Some(_) => return Err(StorageError::NotADirectory(shown)),
        }

        let read_dir = fs::read_dir(&directory)
            .map_err(|e| StorageError::os("list directory", shown.clone(), e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| StorageError::os("list directory", shown.clone(), e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| StorageError::os("inspect", shown.clone(), e))?;

            entries.push(ListingEntry::new(
                entry.file_name().to_string_lossy().into_owned(),
                self.resolver.display_path(&entry.path()),
                file_type.into(),
            ));
        }
        sort_entries(&mut entries);

        debug!(
            "Listed directory {} (real: {}) - {} entries",
            shown,
            directory.display(),
            entries.len()
        );

        Ok(DirectoryListing { directory, entries })
    }

    /// Reads a regular file as UTF-8 text
    pub fn read(&self, file_path: &str) -> StorageResult<String> {
        let file = self.resolver.resolve(file_path)?;
        let shown = self.shown(&file);

        match self.inspect(&file)? {
            None => return Err(StorageError::NotFound(shown)),
            Some(EntryKind::File) => {}
            Some(_) => return Err(StorageError::NotAFile(shown)),
        }

        fs::read_to_string(&file).map_err(|e| StorageError::os("read", shown, e))
    }

    /// Creates a single directory `name` inside `parent_path`
    pub fn create_directory(&self, parent_path: &str, name: &str) -> StorageResult<PathBuf> {
        let name = require_non_blank("Name", name)?;
        let target = self.prepare_new_child(parent_path, name)?;

        fs::create_dir(&target).map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
            _ => StorageError::os("create directory", self.shown(&target), e),
        })?;

        info!("Created directory {}", self.shown(&target));
        Ok(target)
    }

    /// Creates a new file `name` inside `parent_path`; never overwrites.
    pub fn create_file(
        &self,
        parent_path: &str,
        name: &str,
        content: &str,
    ) -> StorageResult<PathBuf> {
        let name = require_non_blank("Name", name)?;
        let target = self.prepare_new_child(parent_path, name)?;
        let shown = self.shown(&target);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(name.to_string()),
                _ => StorageError::os("create file", shown.clone(), e),
            })?;

        if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.flush()) {
            drop(file);
            let _ = fs::remove_file(&target);
            return Err(StorageError::os("write", shown, e));
        }

        info!("Created file {} ({} bytes)", shown, content.len());
        Ok(target)
    }

    /// Appends trimmed `content` to an existing file.
    ///
    /// A newline separates the new content from existing data; an empty file
    /// gets the content without a leading newline.
    pub fn append(&self, file_path: &str, content: &str) -> StorageResult<()> {
        require_non_blank("Path", file_path)?;
        let content = require_non_blank("Content", content)?;

        let file = self.resolver.resolve(file_path)?;
        let shown = self.shown(&file);

        if !file_exists(&file) {
            return Err(StorageError::NotAFile(shown));
        }

        let mut handle = OpenOptions::new()
            .append(true)
            .open(&file)
            .map_err(|e| StorageError::os("open", shown.clone(), e))?;

        let current_len = handle
            .metadata()
            .map_err(|e| StorageError::os("inspect", shown.clone(), e))?
            .len();

        let mut chunk = String::with_capacity(content.len() + 1);
        if current_len > 0 {
            chunk.push('\n');
        }
        chunk.push_str(content);

        handle
            .write_all(chunk.as_bytes())
            .map_err(|e| StorageError::os("append to", shown.clone(), e))?;

        info!("Appended {} bytes to {}", chunk.len(), shown);
        Ok(())
    }

    /// Deletes a file, or a directory with everything below it.
    ///
    /// The sandbox root itself can never be deleted.
    pub fn delete(&self, path: &str) -> StorageResult<EntryKind> {
        let target = self.resolver.resolve(path)?;

        if self.root().is_root(&target) {
            return Err(StorageError::RootDeletionForbidden);
        }

        let shown = self.shown(&target);
        let kind = self
            .inspect(&target)?
            .ok_or_else(|| StorageError::NotFound(shown.clone()))?;

        let removed = match kind {
            EntryKind::Directory => fs::remove_dir_all(&target),
            EntryKind::File | EntryKind::Other => fs::remove_file(&target),
        };
        removed.map_err(|e| StorageError::os("delete", shown.clone(), e))?;

        info!("Deleted {:?} {} (real: {})", kind, shown, target.display());
        Ok(kind)
    }

    /// Renames an item within its own directory.
    pub fn rename(&self, old_path: &str, new_name: &str) -> StorageResult<PathBuf> {
        require_non_blank("Old path", old_path)?;
        let new_name = require_non_blank("New name", new_name)?;

        let old = self.resolver.resolve(old_path)?;
        if self.root().is_root(&old) {
            return Err(StorageError::RootRenameForbidden);
        }

        let parent = old.parent().ok_or(StorageError::RootRenameForbidden)?;
        let candidate = join_relative(&self.resolver.display_path(parent), new_name);
        let new = self.resolver.resolve(&candidate)?;

        if new.parent() != Some(parent) {
            return Err(StorageError::CrossDirectoryMoveForbidden(new_name.to_string()));
        }

        let shown_old = self.shown(&old);
        if self.inspect(&old)?.is_none() {
            return Err(StorageError::NotFound(shown_old));
        }
        if self.inspect(&new)?.is_some() {
            return Err(StorageError::AlreadyExists(new_name.to_string()));
        }

        fs::rename(&old, &new).map_err(|e| StorageError::os("rename", shown_old.clone(), e))?;

        info!("Renamed {} to {}", shown_old, self.shown(&new));
        Ok(new)
    }

    /// Resolve `parent_path/name` for a new entry and check it can be created.
    fn prepare_new_child(&self, parent_path: &str, name: &str) -> StorageResult<PathBuf> {
        let parent = self.resolver.resolve(parent_path)?;
        if !directory_exists(&parent) {
            return Err(StorageError::InvalidParent(parent_path.to_string()));
        }

        let candidate = join_relative(&self.resolver.display_path(&parent), name);
        let target = self.resolver.resolve(&candidate)?;

        // Names are single components; anything else would land somewhere other
        // than the validated parent.
        if target.parent() != Some(parent.as_path()) {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        if self.inspect(&target)?.is_some() {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }

        Ok(target)
    }

    pub(crate) fn inspect(&self, path: &Path) -> StorageResult<Option<EntryKind>> {
        entry_kind(path).map_err(|e| StorageError::os("inspect", self.shown(path), e))
    }

    /// Sandbox-relative label for messages; the root shows as `/`.
    pub(crate) fn shown(&self, path: &Path) -> String {
        let display = self.resolver.display_path(path);
        if display.is_empty() {
            "/".to_string()
        } else {
            display
        }
    }
}
