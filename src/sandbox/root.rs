//! Sandbox root directory

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SandboxError;

/// The single directory every file operation is confined to.
///
/// Holds the canonical absolute form of the configured directory. Built once at
/// startup and never mutated; share it by cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    path: PathBuf,
}

impl SandboxRoot {
    /// Establish the sandbox root, optionally creating the directory first.
    pub fn new(path: impl AsRef<Path>, create_if_missing: bool) -> Result<Self, SandboxError> {
        let path = path.as_ref();

        if create_if_missing && !path.exists() {
            fs::create_dir_all(path).map_err(|source| SandboxError::RootUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Created sandbox root directory {}", path.display());
        }

        let canonical = path
            .canonicalize()
            .map_err(|source| SandboxError::RootUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        if !canonical.is_dir() {
            return Err(SandboxError::RootNotADirectory(canonical));
        }

        Ok(Self { path: canonical })
    }

    /// Canonical absolute path of the root
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_root(&self, path: &Path) -> bool {
        path == self.path
    }
}
