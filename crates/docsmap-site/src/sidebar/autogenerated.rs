//! Sidebar items generated from the directory layout of the docs.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::registry::{PageRecord, PageRegistry, split_number_prefix, strip_dir_prefixes};

/// Generated item, resolved into navigation entries by the builder.
#[derive(Debug, PartialEq)]
pub(super) enum GeneratedItem {
    /// Link to a page.
    Doc(String),
    /// Category for a sub-directory.
    Category {
        label: String,
        items: Vec<GeneratedItem>,
    },
}

/// Generate items for the documents under `dir_name` (`.` is the docs root).
///
/// Documents directly in a directory become links and sub-directories
/// become categories. Siblings are ordered by sidebar position, positioned
/// items first, then by id.
pub(super) fn generate(registry: &PageRegistry, dir_name: &str) -> Vec<GeneratedItem> {
    let root = normalize_dir(dir_name);
    let pages: Vec<&PageRecord> = registry
        .iter()
        .filter(|page| page.source_dir() == root || relative_to(page.source_dir(), root).is_some())
        .collect();
    generate_level(&pages, root)
}

fn generate_level(pages: &[&PageRecord], dir: &str) -> Vec<GeneratedItem> {
    let mut nodes: Vec<(Option<f64>, String, GeneratedItem)> = Vec::new();
    let mut subdirs = BTreeSet::new();

    for page in pages {
        let page_dir = page.source_dir();
        if page_dir == dir {
            nodes.push((
                page.sidebar_position,
                page.id.clone(),
                GeneratedItem::Doc(page.id.clone()),
            ));
        } else if let Some(rest) = relative_to(page_dir, dir) {
            let segment = rest.split_once('/').map_or(rest, |(first, _)| first);
            subdirs.insert(segment);
        }
    }

    for segment in subdirs {
        let path = if dir.is_empty() {
            segment.to_owned()
        } else {
            format!("{dir}/{segment}")
        };
        let (position, name) = split_number_prefix(segment);
        let items = generate_level(pages, &path);
        nodes.push((
            position,
            strip_dir_prefixes(&path),
            GeneratedItem::Category {
                label: title_case(name),
                items,
            },
        ));
    }

    nodes.sort_by(|a, b| compare_positions(a.0, b.0).then_with(|| a.1.cmp(&b.1)));
    nodes.into_iter().map(|(_, _, item)| item).collect()
}

/// Positioned items first, in ascending order.
fn compare_positions(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Part of `path` below `dir`, if `path` is strictly inside it.
fn relative_to<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    if dir.is_empty() {
        return (!path.is_empty()).then_some(path);
    }
    path.strip_prefix(dir)?.strip_prefix('/')
}

fn normalize_dir(dir_name: &str) -> &str {
    let dir = dir_name.trim_start_matches("./").trim_matches('/');
    if dir == "." { "" } else { dir }
}

/// Turn a directory name into a label: `getting-started` → `Getting Started`.
fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use docsmap_storage::Document;
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry(files: &[(&str, &str)]) -> PageRegistry {
        let mut registry = PageRegistry::new();
        for (path, content) in files {
            let meta = docsmap_meta::extract(content).unwrap();
            let doc = Document::new(*path, *content);
            registry
                .insert(PageRecord::from_document(&doc, &meta, "/docs"))
                .unwrap();
        }
        registry
    }

    fn doc(id: &str) -> GeneratedItem {
        GeneratedItem::Doc(id.to_owned())
    }

    #[test]
    fn test_generate_root() {
        let registry = registry(&[
            ("intro.md", ""),
            ("overview/example.md", ""),
            ("overview/getting_started.md", ""),
        ]);

        assert_eq!(
            generate(&registry, "."),
            vec![
                doc("intro"),
                GeneratedItem::Category {
                    label: "Overview".to_owned(),
                    items: vec![doc("overview/example"), doc("overview/getting_started")],
                },
            ]
        );
    }

    #[test]
    fn test_generate_subdirectory_only() {
        let registry = registry(&[
            ("intro.md", ""),
            ("overview/example.md", ""),
            ("overview/deep/nested.md", ""),
            ("overviews/other.md", ""),
        ]);

        assert_eq!(
            generate(&registry, "overview"),
            vec![
                GeneratedItem::Category {
                    label: "Deep".to_owned(),
                    items: vec![doc("overview/deep/nested")],
                },
                doc("overview/example"),
            ]
        );
    }

    #[test]
    fn test_positions_before_unpositioned() {
        let registry = registry(&[
            ("alpha.md", ""),
            ("beta.md", "---\nsidebar_position: 2\n---\n"),
            ("gamma.md", "---\nsidebar_position: 1\n---\n"),
        ]);

        assert_eq!(
            generate(&registry, "."),
            vec![doc("gamma"), doc("beta"), doc("alpha")]
        );
    }

    #[test]
    fn test_number_prefixes_order_and_label() {
        let registry = registry(&[
            ("02-schema/resolvers.md", ""),
            ("01-getting-started/install.md", ""),
            ("03-faq.md", ""),
        ]);

        assert_eq!(
            generate(&registry, "./"),
            vec![
                GeneratedItem::Category {
                    label: "Getting Started".to_owned(),
                    items: vec![doc("getting-started/install")],
                },
                GeneratedItem::Category {
                    label: "Schema".to_owned(),
                    items: vec![doc("schema/resolvers")],
                },
                doc("faq"),
            ]
        );
    }

    #[test]
    fn test_generate_missing_directory_is_empty() {
        let registry = registry(&[("intro.md", "")]);
        assert!(generate(&registry, "missing").is_empty());
    }

    #[test]
    fn test_normalize_dir() {
        assert_eq!(normalize_dir("."), "");
        assert_eq!(normalize_dir("./"), "");
        assert_eq!(normalize_dir("/overview/"), "overview");
        assert_eq!(normalize_dir("./overview"), "overview");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("overview"), "Overview");
        assert_eq!(title_case("getting-started"), "Getting Started");
        assert_eq!(title_case("api_reference"), "Api Reference");
    }
}
