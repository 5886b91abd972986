//! Navigation entries and traversal along sidebars.

use indexmap::IndexMap;
use serde::Serialize;

use crate::registry::{PageRecord, PageRegistry};

/// One node of a sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavigationEntry {
    /// Link to a document page or an external URL.
    Link {
        /// Display label.
        label: String,
        /// Link target (page permalink or external URL).
        href: String,
        /// Target page id; `None` for external links.
        #[serde(rename = "docId", skip_serializing_if = "Option::is_none")]
        page_id: Option<String>,
    },
    /// Named group of entries.
    Category {
        /// Display label.
        label: String,
        /// Whether the category starts collapsed.
        collapsed: bool,
        /// Whether the category can be collapsed.
        collapsible: bool,
        /// Child entries in authored order, never empty.
        #[serde(rename = "items")]
        children: Vec<NavigationEntry>,
    },
}

impl NavigationEntry {
    /// Display label of the entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Link { label, .. } | Self::Category { label, .. } => label,
        }
    }
}

/// Sidebar name to entries, in declaration order.
pub type SidebarTree = IndexMap<String, Vec<NavigationEntry>>;

/// Page ids linked from a list of entries, depth-first in display order.
#[must_use]
pub fn linked_page_ids(entries: &[NavigationEntry]) -> Vec<&str> {
    fn walk<'a>(entries: &'a [NavigationEntry], ids: &mut Vec<&'a str>) {
        for entry in entries {
            match entry {
                NavigationEntry::Link {
                    page_id: Some(id), ..
                } => ids.push(id),
                NavigationEntry::Link { page_id: None, .. } => {}
                NavigationEntry::Category { children, .. } => walk(children, ids),
            }
        }
    }

    let mut ids = Vec::new();
    walk(entries, &mut ids);
    ids
}

/// Pages before and after a page in its sidebar.
#[derive(Debug, Default, PartialEq)]
pub struct PageNeighbors<'a> {
    /// Previous page.
    pub previous: Option<&'a PageRecord>,
    /// Next page.
    pub next: Option<&'a PageRecord>,
}

/// Find the previous and next pages of `page_id` along its sidebar.
///
/// Pages without a sidebar have no neighbors. Repeated links to the same
/// page are skipped so a page is never its own neighbor.
#[must_use]
pub fn neighbors<'a>(
    sidebars: &SidebarTree,
    registry: &'a PageRegistry,
    page_id: &str,
) -> PageNeighbors<'a> {
    let Some(entries) = registry
        .get(page_id)
        .and_then(|page| page.sidebar.as_deref())
        .and_then(|sidebar| sidebars.get(sidebar))
    else {
        return PageNeighbors::default();
    };

    let ids = linked_page_ids(entries);
    let Some(position) = ids.iter().position(|id| *id == page_id) else {
        return PageNeighbors::default();
    };

    let previous = ids[..position]
        .iter()
        .rev()
        .find(|id| **id != page_id)
        .and_then(|id| registry.get(id));
    let next = ids[position + 1..]
        .iter()
        .find(|id| **id != page_id)
        .and_then(|id| registry.get(id));

    PageNeighbors { previous, next }
}
