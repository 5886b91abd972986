//! Filesystem storage implementation for docsmap.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](docsmap_storage::Storage) trait. It walks a docs directory
//! recursively and reads every `.md` / `.mdx` document in a stable order.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docsmap_storage::Storage;
//! use docsmap_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for doc in storage.scan()? {
//!     println!("{}", doc.path);
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use docsmap_storage::{Document, Storage, StorageError};
use scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for Markdown files. Hidden entries
/// and `_`-prefixed partials are not part of the corpus.
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
    /// Scanner for document discovery.
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let scanner = Scanner::new(source_dir.clone());
        Self {
            source_dir,
            scanner,
        }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let refs = self.scanner.scan().map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let documents = refs
            .into_iter()
            .map(|r| {
                let content = fs::read_to_string(&r.abs_path).map_err(|e| {
                    StorageError::io(e, Some(r.abs_path.clone())).with_backend(BACKEND)
                })?;
                tracing::debug!(path = %r.rel_path, bytes = content.len(), "Read document");
                Ok(Document::new(r.rel_path, content))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            documents = documents.len(),
            "Scanned source directory"
        );
        Ok(documents)
    }
}
