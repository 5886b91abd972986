//! Sidebar trees and page registry for docsmap.
//!
//! This crate provides:
//! - [`PageRegistry`]: one [`PageRecord`] per source document, keyed by page id
//! - [`build_sidebars`]: resolution of authored [`SidebarDeclarations`] into
//!   [`NavigationEntry`] trees
//! - [`SiteIndexer`]: the single build pass producing [`VersionMetadata`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use docsmap_site::{BuildOptions, SidebarDeclarations, SiteIndexer};
//! use docsmap_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let declarations = SidebarDeclarations::load(Path::new("sidebars.yaml"))?;
//! let indexer = SiteIndexer::new(storage, BuildOptions::default());
//!
//! let metadata = indexer.build(&declarations)?;
//! std::fs::write("docs-metadata.json", metadata.to_json()?)?;
//! # Ok(())
//! # }
//! ```

mod navigation;
mod registry;
mod sidebar;
mod site;
mod version;

pub use navigation::{NavigationEntry, PageNeighbors, SidebarTree, linked_page_ids, neighbors};
pub use registry::{DuplicateIdError, PageRecord, PageRegistry, split_number_prefix};
pub use sidebar::{CategoryDefaults, ConfigError, SidebarDeclarations, build_sidebars};
pub use site::{BuildError, BuildOptions, SiteIndexer, VersionMetadata};
pub use version::{VersionBanner, VersionDescriptor};
