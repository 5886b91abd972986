//! Parsing of authored sidebar declaration files.
//!
//! A declaration file maps sidebar names to either a list of items or a
//! category shorthand mapping:
//!
//! ```yaml
//! docs:
//!   - intro
//!   - type: category
//!     label: Overview
//!     items: [overview/example, overview/getting_started]
//! api:
//!   Reference:
//!     - type: autogenerated
//!       dirName: reference
//! ```
//!
//! JSON files parse as well since JSON is valid YAML.

use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::ConfigError;

/// Mapping entries in file order, repeated keys included.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entries<V>(Vec<(String, V)>);

impl<V> Entries<V> {
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// First key that appears more than once.
    fn repeated_key(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.iter().map(|(key, _)| key).find(|key| !seen.insert(*key))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a mapping")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Authored sidebar item.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum SidebarItem {
    /// Bare page id, shorthand for `{type: doc, id}`.
    Doc(String),
    /// Item with an explicit `type`.
    Typed(TypedItem),
    /// `{ "Label": [items] }` category shorthand.
    Shorthand(Entries<Vec<SidebarItem>>),
}

/// Item with an explicit `type` tag.
///
/// Required fields are optional here so the builder can name the item and
/// field that is missing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum TypedItem {
    /// Link to a page that records the sidebar on the page.
    Doc {
        id: Option<String>,
        label: Option<String>,
    },
    /// Link to a page that leaves the page's sidebar untouched.
    Ref {
        id: Option<String>,
        label: Option<String>,
    },
    /// External link.
    Link {
        label: Option<String>,
        href: Option<String>,
    },
    /// Named group of items.
    Category {
        label: Option<String>,
        #[serde(default)]
        items: Vec<SidebarItem>,
        collapsed: Option<bool>,
        collapsible: Option<bool>,
    },
    /// Items generated from the documents of a directory.
    Autogenerated {
        #[serde(rename = "dirName", alias = "dir_name")]
        dir_name: String,
    },
}

/// Top-level value of one sidebar.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSidebar {
    Items(Vec<SidebarItem>),
    Categories(Entries<Vec<SidebarItem>>),
}

/// Parsed sidebar declarations, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SidebarDeclarations {
    pub(crate) sidebars: IndexMap<String, Vec<SidebarItem>>,
}

impl SidebarDeclarations {
    /// Parse declarations from YAML (or JSON) text.
    ///
    /// Empty input yields no sidebars.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not a valid declaration,
    /// [`ConfigError::DuplicateSidebar`] if a sidebar name repeats and
    /// [`ConfigError::DuplicateCategory`] if a shorthand label repeats.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: Entries<RawSidebar> =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Some(name) = raw.repeated_key() {
            return Err(ConfigError::DuplicateSidebar {
                name: name.to_owned(),
            });
        }

        let mut sidebars = IndexMap::with_capacity(raw.0.len());
        for (name, sidebar) in raw.0 {
            let items = match sidebar {
                RawSidebar::Items(items) => items,
                RawSidebar::Categories(categories) => vec![SidebarItem::Shorthand(categories)],
            };
            check_shorthand_labels(&name, &items)?;
            sidebars.insert(name, items);
        }

        Ok(Self { sidebars })
    }

    /// Read and parse a declaration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its content is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::Parse(message) => {
                ConfigError::Parse(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Sidebar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Number of declared sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// Whether no sidebar is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}

/// Reject shorthand mappings that repeat a category label.
fn check_shorthand_labels(sidebar: &str, items: &[SidebarItem]) -> Result<(), ConfigError> {
    for item in items {
        match item {
            SidebarItem::Typed(TypedItem::Category { items, .. }) => {
                check_shorthand_labels(sidebar, items)?;
            }
            SidebarItem::Doc(_) | SidebarItem::Typed(_) => {}
            SidebarItem::Shorthand(categories) => {
                if let Some(label) = categories.repeated_key() {
                    return Err(ConfigError::DuplicateCategory {
                        sidebar: sidebar.to_owned(),
                        label: label.to_owned(),
                    });
                }
                for (_, items) in categories.iter() {
                    check_shorthand_labels(sidebar, items)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn items(declarations: &SidebarDeclarations, name: &str) -> Vec<SidebarItem> {
        declarations.sidebars[name].clone()
    }

    #[test]
    fn test_parse_all_item_forms() {
        let yaml = r"
docs:
  - intro
  - type: doc
    id: overview/example
    label: Example
  - type: ref
    id: schema/context
  - type: link
    label: GitHub
    href: https://github.com
  - type: category
    label: Schema
    collapsed: false
    items:
      - schema/resolvers
  - type: autogenerated
    dirName: reference
  - Overview:
      - overview/getting_started
";
        let declarations = SidebarDeclarations::from_yaml(yaml).unwrap();
        let docs = items(&declarations, "docs");

        assert_eq!(docs.len(), 7);
        assert_eq!(docs[0], SidebarItem::Doc("intro".to_owned()));
        assert_eq!(
            docs[1],
            SidebarItem::Typed(TypedItem::Doc {
                id: Some("overview/example".to_owned()),
                label: Some("Example".to_owned()),
            })
        );
        assert_eq!(
            docs[2],
            SidebarItem::Typed(TypedItem::Ref {
                id: Some("schema/context".to_owned()),
                label: None,
            })
        );
        assert_eq!(
            docs[3],
            SidebarItem::Typed(TypedItem::Link {
                label: Some("GitHub".to_owned()),
                href: Some("https://github.com".to_owned()),
            })
        );
        assert_eq!(
            docs[4],
            SidebarItem::Typed(TypedItem::Category {
                label: Some("Schema".to_owned()),
                items: vec![SidebarItem::Doc("schema/resolvers".to_owned())],
                collapsed: Some(false),
                collapsible: None,
            })
        );
        assert_eq!(
            docs[5],
            SidebarItem::Typed(TypedItem::Autogenerated {
                dir_name: "reference".to_owned(),
            })
        );
        assert!(matches!(&docs[6], SidebarItem::Shorthand(map) if map.iter().any(|(label, _)| label == "Overview")));
    }

    #[test]
    fn test_parse_json_declarations() {
        let json = r#"{"docs": [{"type": "category", "label": "Overview", "items": ["overview/example"]}]}"#;
        let declarations = SidebarDeclarations::from_yaml(json).unwrap();

        assert_eq!(declarations.len(), 1);
        assert!(matches!(
            &items(&declarations, "docs")[0],
            SidebarItem::Typed(TypedItem::Category { .. })
        ));
    }

    #[test]
    fn test_top_level_category_shorthand() {
        let yaml = "docs:\n  Overview: [a, b]\n  Schema: [c]\n";
        let declarations = SidebarDeclarations::from_yaml(yaml).unwrap();
        let docs = items(&declarations, "docs");

        assert_eq!(docs.len(), 1);
        let SidebarItem::Shorthand(categories) = &docs[0] else {
            panic!("expected shorthand, got {:?}", docs[0]);
        };
        let labels: Vec<&str> = categories.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Overview", "Schema"]);
    }

    #[test]
    fn test_repeated_sidebar_name_rejected() {
        let err = SidebarDeclarations::from_yaml("docs: [a]\napi: [c]\ndocs: [b]\n").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSidebar { ref name } if name == "docs"));
    }

    #[test]
    fn test_repeated_category_label_rejected() {
        let yaml = "docs:\n  Overview: [a]\n  Overview: [b]\n";
        let err = SidebarDeclarations::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateCategory { ref sidebar, ref label }
                if sidebar == "docs" && label == "Overview"
        ));

        let nested = r"
docs:
  - type: category
    label: Schema
    items:
      - Types: [a]
        Types: [b]
";
        let err = SidebarDeclarations::from_yaml(nested).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateCategory { ref label, .. } if label == "Types"
        ));
    }

    #[test]
    fn test_sidebar_names_keep_declaration_order() {
        let yaml = "zeta: [a]\nalpha: [b]\nmiddle: [c]\n";
        let declarations = SidebarDeclarations::from_yaml(yaml).unwrap();

        assert_eq!(
            declarations.names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "middle"]
        );
    }

    #[test]
    fn test_empty_declarations() {
        let declarations = SidebarDeclarations::from_yaml("\n").unwrap();
        assert!(declarations.is_empty());
    }

    #[test]
    fn test_unknown_item_type_is_parse_error() {
        let err = SidebarDeclarations::from_yaml("docs:\n  - type: html\n    value: x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = SidebarDeclarations::from_yaml("docs: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sidebars.yaml");
        std::fs::write(&path, "docs: 42\n").unwrap();

        let err = SidebarDeclarations::load(&path).unwrap_err();
        assert!(err.to_string().contains("sidebars.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SidebarDeclarations::load(Path::new("/nonexistent/sidebars.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
