//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;

use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory storage for tests.
///
/// Files are kept in a sorted map so [`scan`](Storage::scan) returns them
/// in path order, the same guarantee real backends give.
///
/// # Example
///
/// ```ignore
/// use docsmap_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("intro.md", "# Intro\n\nWelcome.")
///     .with_file("overview/example.md", "# Example");
///
/// assert_eq!(storage.scan().unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, String>,
    failure: Option<StorageErrorKind>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given relative path and content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Make every subsequent scan fail with the given error kind.
    #[must_use]
    pub fn failing(mut self, kind: StorageErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        if let Some(kind) = self.failure {
            return Err(StorageError::new(kind).with_backend(BACKEND));
        }

        Ok(self
            .files
            .iter()
            .map(|(path, content)| Document::new(path.clone(), content.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scan_empty() {
        let storage = MockStorage::new();

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_returns_sorted_documents() {
        let storage = MockStorage::new()
            .with_file("schema/resolvers.md", "# Resolvers")
            .with_file("intro.md", "# Intro")
            .with_file("overview/example.md", "# Example");

        let paths: Vec<_> = storage
            .scan()
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();

        assert_eq!(
            paths,
            vec!["intro.md", "overview/example.md", "schema/resolvers.md"]
        );
    }

    #[test]
    fn test_with_file_replaces_content() {
        let storage = MockStorage::new()
            .with_file("intro.md", "old")
            .with_file("intro.md", "new");

        let docs = storage.scan().unwrap();

        assert_eq!(docs, vec![Document::new("intro.md", "new")]);
    }

    #[test]
    fn test_failing_scan() {
        let storage = MockStorage::new()
            .with_file("intro.md", "# Intro")
            .failing(StorageErrorKind::PermissionDenied);

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.to_string(), "[Mock] Permission denied");
    }
}
