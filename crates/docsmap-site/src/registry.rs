//! Page registry: one record per source document, keyed by page id.
//!
//! Page ids are independent of file paths: directory segments lose their
//! numeric ordering prefix (`01-guides` becomes `guides`) and the file part
//! comes from the front matter `id` or the file stem.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use docsmap_meta::DocumentMeta;
use docsmap_storage::Document;
use regex::Regex;
use serde::Serialize;

/// Numeric ordering prefix such as `01-`, `2_` or `10.`.
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*[-_.]+\s*([^-_.\s].*)$").expect("invalid number prefix regex")
});

/// Metadata of one documentation page.
///
/// Only `id`, `title`, `description` and `sidebar` are part of the
/// serialized artifact; the remaining fields drive sidebar generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageRecord {
    /// Stable page identifier (e.g., "overview/getting_started").
    pub id: String,
    /// Page title, empty when the document has none.
    pub title: String,
    /// Page description, empty when the document has none.
    pub description: String,
    /// Name of the sidebar this page belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    /// Source path relative to the docs root.
    #[serde(skip)]
    pub source_path: String,
    /// URL path of the rendered page.
    #[serde(skip)]
    pub permalink: String,
    /// Label override for sidebar links.
    #[serde(skip)]
    pub sidebar_label: Option<String>,
    /// Ordering key inside autogenerated sidebars.
    #[serde(skip)]
    pub sidebar_position: Option<f64>,
}

impl PageRecord {
    /// Build the record for a document from its extracted metadata.
    ///
    /// `route_base_path` is prepended to every permalink and carries no
    /// trailing slash (`""` for a site served from the root).
    #[must_use]
    pub fn from_document(doc: &Document, meta: &DocumentMeta, route_base_path: &str) -> Self {
        let front_matter = &meta.front_matter;
        let dir = strip_dir_prefixes(doc.dir());
        let (file_position, file_name) = split_number_prefix(doc.stem());
        let name = front_matter.id.as_deref().unwrap_or(file_name);
        let id = join_path(&dir, name);

        let slug = match front_matter.slug.as_deref() {
            Some(slug) if slug.starts_with('/') => slug.to_owned(),
            Some(slug) => format!("/{}", join_path(&dir, slug.trim_start_matches("./"))),
            None => format!("/{id}"),
        };

        Self {
            title: meta.title().unwrap_or_default().to_owned(),
            description: meta.description().unwrap_or_default().to_owned(),
            sidebar: None,
            source_path: doc.path.clone(),
            permalink: format!("{route_base_path}{slug}"),
            sidebar_label: front_matter
                .sidebar_label
                .clone()
                .filter(|label| !label.is_empty()),
            sidebar_position: front_matter.sidebar_position.or(file_position),
            id,
        }
    }

    /// Directory of the source file relative to the docs root ("" for root).
    #[must_use]
    pub fn source_dir(&self) -> &str {
        self.source_path
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir)
    }

    /// Label for a sidebar link: `sidebar_label` > title > id.
    ///
    /// Empty labels count as absent.
    #[must_use]
    pub fn link_label(&self) -> &str {
        if let Some(label) = self.sidebar_label.as_deref().filter(|l| !l.is_empty()) {
            return label;
        }
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Two documents resolved to the same page id.
#[derive(Debug, thiserror::Error)]
#[error("Duplicate page id `{id}` declared by {first} and {second}")]
pub struct DuplicateIdError {
    /// Colliding page id.
    pub id: String,
    /// Source path of the document registered first.
    pub first: String,
    /// Source path of the colliding document.
    pub second: String,
}

/// Page records keyed by id, iterated in id order.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PageRegistry {
    pages: BTreeMap<String, PageRecord>,
}

impl PageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateIdError`] if a page with the same id exists.
    pub fn insert(&mut self, record: PageRecord) -> Result<(), DuplicateIdError> {
        if let Some(existing) = self.pages.get(&record.id) {
            return Err(DuplicateIdError {
                id: record.id,
                first: existing.source_path.clone(),
                second: record.source_path,
            });
        }
        self.pages.insert(record.id.clone(), record);
        Ok(())
    }

    /// Look up a page by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageRecord> {
        self.pages.get(id)
    }

    /// Check whether a page id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    /// Iterate over pages in id order.
    pub fn iter(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.values()
    }

    /// Number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the registry has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Record the sidebar a page belongs to.
    ///
    /// The first sidebar wins. Returns the sidebar the page already
    /// belonged to when it differs from `sidebar`.
    pub(crate) fn assign_sidebar(&mut self, id: &str, sidebar: &str) -> Option<String> {
        let page = self.pages.get_mut(id)?;
        if let Some(existing) = &page.sidebar {
            return (existing != sidebar).then(|| existing.clone());
        }
        page.sidebar = Some(sidebar.to_owned());
        None
    }
}

/// Split a numeric ordering prefix off a path segment.
///
/// `"01-intro"` yields `(Some(1.0), "intro")`. Segments that would become
/// empty, or that have no separator after the digits, are left unchanged.
#[must_use]
pub fn split_number_prefix(segment: &str) -> (Option<f64>, &str) {
    match NUMBER_PREFIX.captures(segment) {
        Some(caps) => {
            let position = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let rest = caps.get(2).map_or(segment, |m| m.as_str());
            (position, rest)
        }
        None => (None, segment),
    }
}

/// Remove numeric prefixes from every segment of a relative directory.
pub(crate) fn strip_dir_prefixes(dir: &str) -> String {
    dir.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| split_number_prefix(segment).1)
        .collect::<Vec<_>>()
        .join("/")
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(path: &str, content: &str) -> PageRecord {
        let meta = docsmap_meta::extract(content).unwrap();
        PageRecord::from_document(&Document::new(path, content), &meta, "/gql/docs")
    }

    #[test]
    fn test_record_from_nested_document() {
        let page = record(
            "overview/getting_started.md",
            "# Getting started\n\nInstall gql.",
        );

        assert_eq!(page.id, "overview/getting_started");
        assert_eq!(page.title, "Getting started");
        assert_eq!(page.description, "Install gql.");
        assert_eq!(page.sidebar, None);
        assert_eq!(page.source_path, "overview/getting_started.md");
        assert_eq!(page.source_dir(), "overview");
        assert_eq!(page.permalink, "/gql/docs/overview/getting_started");
    }

    #[test]
    fn test_record_without_title_or_description() {
        let page = record("blank.md", "");

        assert_eq!(page.id, "blank");
        assert_eq!(page.title, "");
        assert_eq!(page.description, "");
        assert_eq!(page.link_label(), "blank");
    }

    #[test]
    fn test_front_matter_id_keeps_directory() {
        let page = record("overview/file-name.md", "---\nid: custom\n---\n# Custom");

        assert_eq!(page.id, "overview/custom");
        assert_eq!(page.permalink, "/gql/docs/overview/custom");
    }

    #[test]
    fn test_number_prefixes_stripped_from_id() {
        let page = record("01-guides/02-install.md", "# Install");

        assert_eq!(page.id, "guides/install");
        assert_eq!(page.sidebar_position, Some(2.0));
        assert_eq!(page.source_dir(), "01-guides");
    }

    #[test]
    fn test_front_matter_position_wins_over_prefix() {
        let page = record("03-setup.md", "---\nsidebar_position: 7\n---\n");

        assert_eq!(page.sidebar_position, Some(7.0));
    }

    #[test]
    fn test_absolute_slug() {
        let page = record("overview/intro.md", "---\nslug: /start\n---\n");

        assert_eq!(page.id, "overview/intro");
        assert_eq!(page.permalink, "/gql/docs/start");
    }

    #[test]
    fn test_relative_slug() {
        let page = record("01-overview/intro.md", "---\nslug: first-steps\n---\n");

        assert_eq!(page.permalink, "/gql/docs/overview/first-steps");
    }

    #[test]
    fn test_root_route_base_path() {
        let meta = docsmap_meta::extract("# Intro").unwrap();
        let page = PageRecord::from_document(&Document::new("intro.md", "# Intro"), &meta, "");

        assert_eq!(page.permalink, "/intro");
    }

    #[test]
    fn test_link_label_precedence() {
        let labeled = record("a.md", "---\nsidebar_label: Short\n---\n# Long title");
        let titled = record("b.md", "# Long title");

        assert_eq!(labeled.link_label(), "Short");
        assert_eq!(titled.link_label(), "Long title");
    }

    #[test]
    fn test_empty_sidebar_label_falls_back_to_title() {
        let page = record("a.md", "---\nsidebar_label: ''\n---\n# Intro");
        assert_eq!(page.sidebar_label, None);
        assert_eq!(page.link_label(), "Intro");

        let mut untitled = record("guides/b.md", "");
        untitled.sidebar_label = Some(String::new());
        assert_eq!(untitled.link_label(), "guides/b");
    }

    #[test]
    fn test_split_number_prefix() {
        assert_eq!(split_number_prefix("01-intro"), (Some(1.0), "intro"));
        assert_eq!(split_number_prefix("2_setup"), (Some(2.0), "setup"));
        assert_eq!(split_number_prefix("10. Guides"), (Some(10.0), "Guides"));
        assert_eq!(split_number_prefix("intro"), (None, "intro"));
        assert_eq!(split_number_prefix("2024"), (None, "2024"));
        assert_eq!(split_number_prefix("1-"), (None, "1-"));
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let mut registry = PageRegistry::new();
        registry.insert(record("intro.md", "# Intro")).unwrap();

        let err = registry
            .insert(record("01-intro.md", "# Intro again"))
            .unwrap_err();

        assert_eq!(err.id, "intro");
        assert_eq!(err.first, "intro.md");
        assert_eq!(err.second, "01-intro.md");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("intro").unwrap().title, "Intro");
    }

    #[test]
    fn test_registry_iterates_in_id_order() {
        let mut registry = PageRegistry::new();
        for path in ["schema/resolvers.md", "intro.md", "overview/example.md"] {
            registry.insert(record(path, "")).unwrap();
        }

        let ids: Vec<&str> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "overview/example", "schema/resolvers"]);
        assert!(registry.contains("intro"));
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn test_assign_sidebar_first_wins() {
        let mut registry = PageRegistry::new();
        registry.insert(record("intro.md", "")).unwrap();

        assert_eq!(registry.assign_sidebar("intro", "docs"), None);
        assert_eq!(registry.assign_sidebar("intro", "docs"), None);
        assert_eq!(
            registry.assign_sidebar("intro", "api"),
            Some("docs".to_owned())
        );
        assert_eq!(registry.get("intro").unwrap().sidebar.as_deref(), Some("docs"));
    }

    #[test]
    fn test_record_serialization_skips_internal_fields() {
        let mut page = record("overview/example.md", "# Example\n\ngql is a GraphQL implementation.");
        page.sidebar = Some("docs".to_owned());

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "overview/example",
                "title": "Example",
                "description": "gql is a GraphQL implementation.",
                "sidebar": "docs",
            })
        );
    }

    #[test]
    fn test_record_serialization_without_sidebar() {
        let page = record("orphan.md", "# Orphan");

        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(json, r#"{"id":"orphan","title":"Orphan","description":""}"#);
    }
}
