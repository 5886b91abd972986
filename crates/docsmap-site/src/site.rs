//! Single-pass build of the documentation index.
//!
//! Scans storage once, registers every page, resolves the sidebar
//! declarations against the registry and packages the result with the
//! version descriptor into [`VersionMetadata`].

use std::sync::Arc;
use std::time::Instant;

use docsmap_meta::FrontMatterError;
use docsmap_storage::{Storage, StorageError};
use serde::Serialize;

use crate::navigation::{PageNeighbors, SidebarTree, neighbors};
use crate::registry::{DuplicateIdError, PageRecord, PageRegistry};
use crate::sidebar::{CategoryDefaults, ConfigError, SidebarDeclarations, build_sidebars};
use crate::version::VersionDescriptor;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Error that halts a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source documents cannot be listed or read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A document has invalid front matter.
    #[error("{path}: {source}")]
    FrontMatter {
        /// Source path of the document.
        path: String,
        /// Parse failure.
        source: FrontMatterError,
    },
    /// Two documents share a page id.
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),
    /// Sidebar declarations do not resolve.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Build options.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// URL prefix of every permalink, without trailing slash.
    pub route_base_path: String,
    /// Collapse flags for categories that do not set them.
    pub category_defaults: CategoryDefaults,
    /// Version the index belongs to.
    pub version: VersionDescriptor,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            route_base_path: "/docs".to_owned(),
            category_defaults: CategoryDefaults::default(),
            version: VersionDescriptor::default(),
        }
    }
}

/// Sidebars and pages of one documentation version.
///
/// Serializes to the index artifact consumed by the site renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    /// Version descriptor, flattened into the top-level object.
    #[serde(flatten)]
    pub version: VersionDescriptor,
    /// Sidebar trees by name, in declaration order.
    pub docs_sidebars: SidebarTree,
    /// Page records by id, in id order.
    pub docs: PageRegistry,
}

impl VersionMetadata {
    /// Look up a page by id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&PageRecord> {
        self.docs.get(id)
    }

    /// Previous and next pages of `id` along its sidebar.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> PageNeighbors<'_> {
        neighbors(&self.docs_sidebars, &self.docs, id)
    }

    /// Serialize to pretty-printed JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Builds [`VersionMetadata`] from a storage backend.
pub struct SiteIndexer {
    storage: Arc<dyn Storage>,
    options: BuildOptions,
}

impl SiteIndexer {
    /// Create an indexer reading documents from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, options: BuildOptions) -> Self {
        Self { storage, options }
    }

    /// Build options in use.
    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if storage fails, a document has invalid front
    /// matter, two documents share an id or the sidebars do not resolve.
    pub fn build(&self, declarations: &SidebarDeclarations) -> Result<VersionMetadata, BuildError> {
        let start = Instant::now();

        let storage_start = Instant::now();
        let documents = self.storage.scan()?;
        let storage_scan_ms = elapsed_ms(storage_start);

        let registry_start = Instant::now();
        let mut registry = PageRegistry::new();
        for doc in &documents {
            let meta = docsmap_meta::extract(&doc.content).map_err(|source| {
                BuildError::FrontMatter {
                    path: doc.path.clone(),
                    source,
                }
            })?;
            let record = PageRecord::from_document(doc, &meta, &self.options.route_base_path);
            tracing::debug!(path = %doc.path, page_id = %record.id, "Registered page");
            registry.insert(record)?;
        }
        let registry_ms = elapsed_ms(registry_start);

        let sidebars_start = Instant::now();
        let docs_sidebars =
            build_sidebars(declarations, &mut registry, self.options.category_defaults)?;
        let sidebars_ms = elapsed_ms(sidebars_start);

        tracing::info!(
            version = %self.options.version.name,
            page_count = registry.len(),
            sidebar_count = docs_sidebars.len(),
            storage_scan_ms,
            registry_ms,
            sidebars_ms,
            elapsed_ms = elapsed_ms(start),
            "Documentation index built"
        );

        Ok(VersionMetadata {
            version: self.options.version.clone(),
            docs_sidebars,
            docs: registry,
        })
    }
}
