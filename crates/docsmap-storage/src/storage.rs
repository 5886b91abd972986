//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing the source documents of a
//! documentation version, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! Document paths are relative to the storage root and always use `/` as
//! the separator, regardless of platform:
//! - `"intro.md"` - document at the root
//! - `"overview/example.md"` - nested document
//! - `"01-schema/02-resolvers.mdx"` - numeric ordering prefixes are kept verbatim

use std::path::PathBuf;

/// A source document returned by storage scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Relative source path with `/` separators (e.g., `"overview/example.md"`).
    pub path: String,
    /// Raw Markdown content, including any front matter block.
    pub content: String,
}

impl Document {
    /// Create a document from a relative path and its content.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Directory part of the path (`""` for root documents).
    #[must_use]
    pub fn dir(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// File name without directory and extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.path.rsplit_once('/').map_or(self.path.as_str(), |(_, n)| n);
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Storage root or document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Document is not valid UTF-8 or the path cannot be represented.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Source of the Markdown documents of one documentation version.
///
/// A build calls [`scan`](Storage::scan) exactly once. Implementations must
/// return documents in a stable order so that identical inputs produce
/// identical build output.
pub trait Storage: Send + Sync {
    /// Return every Markdown document of the version, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage root is missing or a document
    /// cannot be read.
    fn scan(&self) -> Result<Vec<Document>, StorageError>;
}
