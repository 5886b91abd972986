//! Sidebar tree building.
//!
//! Resolves authored [`SidebarDeclarations`] against the [`PageRegistry`]
//! into [`NavigationEntry`] trees, recording on each page the sidebar it
//! belongs to.

mod autogenerated;
mod declaration;

use std::path::PathBuf;

use autogenerated::GeneratedItem;
use declaration::{SidebarItem, TypedItem};

pub use declaration::SidebarDeclarations;

use crate::navigation::{NavigationEntry, SidebarTree};
use crate::registry::PageRegistry;

/// Malformed sidebar declaration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Declaration file cannot be read.
    #[error("Cannot read sidebar declarations {}: {source}", .path.display())]
    Read {
        /// Declaration file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Declaration file is not valid.
    #[error("Invalid sidebar declarations: {0}")]
    Parse(String),
    /// Category without items.
    #[error("Category `{label}` in sidebar `{sidebar}` has no items")]
    EmptyCategory {
        /// Sidebar name.
        sidebar: String,
        /// Category label.
        label: String,
    },
    /// Link to a page id that is not registered.
    #[error("Sidebar `{sidebar}` references unknown document `{id}`")]
    UnknownDocument {
        /// Sidebar name.
        sidebar: String,
        /// Referenced page id.
        id: String,
    },
    /// Autogenerated item matching no documents.
    #[error("Autogenerated item in sidebar `{sidebar}` found no documents in `{dir}`")]
    EmptyAutogenerated {
        /// Sidebar name.
        sidebar: String,
        /// Declared directory.
        dir: String,
    },
    /// Sidebar name declared more than once.
    #[error("Sidebar `{name}` is declared more than once")]
    DuplicateSidebar {
        /// Sidebar name.
        name: String,
    },
    /// Category shorthand label repeated within one mapping.
    #[error("Category `{label}` in sidebar `{sidebar}` is declared more than once")]
    DuplicateCategory {
        /// Sidebar name.
        sidebar: String,
        /// Category label.
        label: String,
    },
    /// Required item field absent or empty.
    #[error("`{item}` item in sidebar `{sidebar}` is missing `{field}`")]
    MissingField {
        /// Sidebar name.
        sidebar: String,
        /// Item type.
        item: &'static str,
        /// Missing field.
        field: &'static str,
    },
}

/// Collapse flags applied to categories that do not set them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryDefaults {
    /// Whether categories start collapsed.
    pub collapsed: bool,
    /// Whether categories can be collapsed.
    pub collapsible: bool,
}

impl Default for CategoryDefaults {
    fn default() -> Self {
        Self {
            collapsed: true,
            collapsible: true,
        }
    }
}

/// Build every declared sidebar.
///
/// Sidebars are processed in declaration order; a page linked from several
/// sidebars keeps the first one.
///
/// # Errors
///
/// Returns [`ConfigError`] for empty categories, unknown page ids, empty
/// autogenerated directories and items missing a label or href.
pub fn build_sidebars(
    declarations: &SidebarDeclarations,
    registry: &mut PageRegistry,
    defaults: CategoryDefaults,
) -> Result<SidebarTree, ConfigError> {
    let mut trees = SidebarTree::new();
    for (name, items) in &declarations.sidebars {
        let mut builder = SidebarBuilder {
            registry: &mut *registry,
            defaults,
            sidebar: name,
        };
        let entries = builder.build_items(items)?;
        trees.insert(name.clone(), entries);
    }
    Ok(trees)
}

/// Builds the entries of one sidebar.
struct SidebarBuilder<'r, 's> {
    registry: &'r mut PageRegistry,
    defaults: CategoryDefaults,
    sidebar: &'s str,
}

impl SidebarBuilder<'_, '_> {
    fn build_items(&mut self, items: &[SidebarItem]) -> Result<Vec<NavigationEntry>, ConfigError> {
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match item {
                SidebarItem::Doc(id) => entries.push(self.doc_link(id, None, true)?),
                SidebarItem::Typed(typed) => self.build_typed(typed, &mut entries)?,
                SidebarItem::Shorthand(categories) => {
                    for (label, items) in categories.iter() {
                        let children = self.build_items(items)?;
                        entries.push(self.category(Some(label), children, None, None)?);
                    }
                }
            }
        }
        Ok(entries)
    }

    fn build_typed(
        &mut self,
        item: &TypedItem,
        entries: &mut Vec<NavigationEntry>,
    ) -> Result<(), ConfigError> {
        match item {
            TypedItem::Doc { id, label } => {
                let id = self.required(id.as_deref(), "doc", "id")?;
                entries.push(self.doc_link(&id, label.as_deref(), true)?);
            }
            TypedItem::Ref { id, label } => {
                let id = self.required(id.as_deref(), "ref", "id")?;
                entries.push(self.doc_link(&id, label.as_deref(), false)?);
            }
            TypedItem::Link { label, href } => entries.push(NavigationEntry::Link {
                label: self.required(label.as_deref(), "link", "label")?,
                href: self.required(href.as_deref(), "link", "href")?,
                page_id: None,
            }),
            TypedItem::Category {
                label,
                items,
                collapsed,
                collapsible,
            } => {
                let children = self.build_items(items)?;
                entries.push(self.category(label.as_deref(), children, *collapsed, *collapsible)?);
            }
            TypedItem::Autogenerated { dir_name } => {
                let generated = autogenerated::generate(self.registry, dir_name);
                if generated.is_empty() {
                    return Err(ConfigError::EmptyAutogenerated {
                        sidebar: self.sidebar.to_owned(),
                        dir: dir_name.clone(),
                    });
                }
                entries.extend(self.resolve_generated(generated)?);
            }
        }
        Ok(())
    }

    fn resolve_generated(
        &mut self,
        items: Vec<GeneratedItem>,
    ) -> Result<Vec<NavigationEntry>, ConfigError> {
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let entry = match item {
                GeneratedItem::Doc(id) => self.doc_link(&id, None, true)?,
                GeneratedItem::Category { label, items } => {
                    let children = self.resolve_generated(items)?;
                    self.category(Some(label.as_str()), children, None, None)?
                }
            };
            entries.push(entry);
        }
        Ok(entries)
    }

    fn doc_link(
        &mut self,
        id: &str,
        label: Option<&str>,
        record_sidebar: bool,
    ) -> Result<NavigationEntry, ConfigError> {
        let page = self
            .registry
            .get(id)
            .ok_or_else(|| ConfigError::UnknownDocument {
                sidebar: self.sidebar.to_owned(),
                id: id.to_owned(),
            })?;

        let entry = NavigationEntry::Link {
            label: label
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| page.link_label())
                .to_owned(),
            href: page.permalink.clone(),
            page_id: Some(page.id.clone()),
        };

        if record_sidebar && let Some(first) = self.registry.assign_sidebar(id, self.sidebar) {
            tracing::warn!(
                page_id = %id,
                sidebar = %first,
                ignored = %self.sidebar,
                "Page is linked from more than one sidebar, keeping the first"
            );
        }

        Ok(entry)
    }

    fn category(
        &self,
        label: Option<&str>,
        children: Vec<NavigationEntry>,
        collapsed: Option<bool>,
        collapsible: Option<bool>,
    ) -> Result<NavigationEntry, ConfigError> {
        let label = self.required(label, "category", "label")?;
        if children.is_empty() {
            return Err(ConfigError::EmptyCategory {
                sidebar: self.sidebar.to_owned(),
                label,
            });
        }

        let collapsible = collapsible.unwrap_or(self.defaults.collapsible);
        Ok(NavigationEntry::Category {
            label,
            collapsed: collapsible && collapsed.unwrap_or(self.defaults.collapsed),
            collapsible,
            children,
        })
    }

    fn required(
        &self,
        value: Option<&str>,
        item: &'static str,
        field: &'static str,
    ) -> Result<String, ConfigError> {
        match value {
            Some(value) if !value.is_empty() => Ok(value.to_owned()),
            _ => Err(ConfigError::MissingField {
                sidebar: self.sidebar.to_owned(),
                item,
                field,
            }),
        }
    }
}
