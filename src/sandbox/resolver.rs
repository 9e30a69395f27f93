//! Path resolution and validation
//!
//! Turns untrusted, forward-slash relative paths from clients into absolute
//! paths that are guaranteed to lie inside the sandbox root.

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::error::PathRejection;
use crate::sandbox::SandboxRoot;

/// The single gate between client input and the filesystem.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: SandboxRoot,
}

impl PathResolver {
    pub fn new(root: SandboxRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    /// Resolve a client path to an absolute path inside the sandbox.
    ///
    /// The empty string denotes the root itself. Leading separators are stripped,
    /// so `/etc/passwd` names `<root>/etc/passwd`. Any `..` that would climb above
    /// the root, a drive prefix, a NUL byte, or a symbolic link anywhere below the
    /// root rejects the whole path. Existence is not required.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, PathRejection> {
        let root = self.root.path();

        if relative.is_empty() {
            return Ok(root.to_path_buf());
        }

        if relative.contains('\0') {
            return Err(PathRejection::Malformed);
        }

        let remainder = normalize(relative)?;
        let candidate = root.join(&remainder);
        ensure_within(root, &candidate, relative)?;

        self.reject_symlinks(&remainder, relative)?;

        Ok(candidate)
    }

    /// Sandbox-relative, forward-slash form of a path already inside the sandbox.
    ///
    /// The root itself displays as the empty string.
    pub fn display_path(&self, absolute: &Path) -> String {
        absolute
            .strip_prefix(self.root.path())
            .map(|relative| {
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default()
    }

    fn reject_symlinks(&self, remainder: &Path, original: &str) -> Result<(), PathRejection> {
        let mut current = self.root.path().to_path_buf();

        for part in remainder.components() {
            current.push(part);
            match fs::symlink_metadata(&current) {
                Ok(meta) if meta.file_type().is_symlink() => {
                    return Err(PathRejection::Symlink(original.to_string()));
                }
                Ok(_) => {}
                // Nothing below a missing component can exist either.
                Err(_) => break,
            }
        }

        Ok(())
    }
}

/// Final containment check on a joined candidate.
///
/// `Path::starts_with` compares whole components, so `/data2` never passes
/// against `/data`.
fn ensure_within(root: &Path, candidate: &Path, original: &str) -> Result<(), PathRejection> {
    if candidate.starts_with(root) {
        Ok(())
    } else {
        Err(PathRejection::OutsideRoot(original.to_string()))
    }
}

/// Lexically normalize a client path into a pure relative remainder.
///
/// No filesystem access happens here.
fn normalize(relative: &str) -> Result<PathBuf, PathRejection> {
    let native = relative.replace('/', MAIN_SEPARATOR_STR);
    let mut parts: Vec<&OsStr> = Vec::new();

    for component in Path::new(&native).components() {
        match component {
            Component::Prefix(_) => {
                return Err(PathRejection::ForeignPrefix(relative.to_string()));
            }
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(PathRejection::Traversal(relative.to_string()));
                }
            }
            Component::Normal(part) => parts.push(part),
        }
    }

    Ok(parts.into_iter().collect())
}
