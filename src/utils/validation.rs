//! Input validation utilities
//!
//! Provides input validation and sanitization functions.

use crate::error::{StorageError, StorageResult};

/// Trim a required field, failing with `EmptyInput` when nothing is left.
pub fn require_non_blank<'a>(field: &'static str, value: &'a str) -> StorageResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(StorageError::EmptyInput(field))
    } else {
        Ok(trimmed)
    }
}

/// Join a sandbox-relative directory and a child name with a forward slash.
pub fn join_relative(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", directory.trim_end_matches('/'), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank() {
        assert_eq!(require_non_blank("Name", "  notes ").unwrap(), "notes");
        assert!(matches!(
            require_non_blank("Name", " \t\n"),
            Err(StorageError::EmptyInput("Name"))
        ));
        assert!(require_non_blank("Name", "").is_err());
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join_relative("", "a.txt"), "a.txt");
        assert_eq!(join_relative("docs", "a.txt"), "docs/a.txt");
        assert_eq!(join_relative("docs/", "a.txt"), "docs/a.txt");
    }
}
