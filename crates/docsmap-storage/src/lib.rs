//! Source document storage abstraction for docsmap.
//!
//! The site builder never touches the filesystem directly. It asks a
//! [`Storage`] backend for the documents of one documentation version and
//! works on the returned values. This keeps the build a pure transform and
//! lets tests run against [`MockStorage`] (behind the `mock` feature).
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

#[cfg(feature = "mock")]
mod mock;
mod storage;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Document, Storage, StorageError, StorageErrorKind};
