//! Document discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the
//! reading phase. The Scanner only identifies files that form documents,
//! returning lightweight references for `FsStorage` to read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions recognized as Markdown documents.
const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Reference to a document's source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// Relative path with `/` separators (e.g., "overview/example.md").
    pub rel_path: String,
    /// Absolute path to the file.
    pub abs_path: PathBuf,
}

/// Discovers Markdown documents by walking the filesystem.
///
/// Entries are visited in byte order of their file names so the result is
/// the same on every platform and every run. Hidden entries (`.` prefix)
/// and partials (`_` prefix) are skipped, including whole directories.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub(crate) fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Walk the source directory and return document references in path order.
    pub(crate) fn scan(&self) -> io::Result<Vec<DocumentRef>> {
        let mut refs = Vec::new();
        scan_directory(&self.source_dir, "", &mut refs)?;
        Ok(refs)
    }
}

fn scan_directory(
    dir_path: &Path,
    rel_prefix: &str,
    refs: &mut Vec<DocumentRef>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir_path)?
        .map(|entry| {
            let entry = entry?;
            let is_dir = entry.file_type()?.is_dir();
            Ok((entry, is_dir))
        })
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|(entry, _)| entry.file_name());

    for (entry, is_dir) in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }

        let rel_path = if rel_prefix.is_empty() {
            name
        } else {
            format!("{rel_prefix}/{name}")
        };

        if is_dir {
            scan_directory(&entry.path(), &rel_path, refs)?;
        } else if is_markdown(&entry.path()) {
            refs.push(DocumentRef {
                rel_path,
                abs_path: entry.path(),
            });
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MARKDOWN_EXTENSIONS.contains(&e))
}
