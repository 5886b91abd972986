//! Version descriptor scoping one set of sidebars and pages.

use serde::Serialize;

/// Banner shown above the pages of a version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBanner {
    /// Version not released yet.
    Unreleased,
    /// Version no longer maintained.
    Unmaintained,
}

/// Identity and presentation flags of a documentation version.
///
/// Serialized with the keys `pluginId`, `version`, `label`, `banner`,
/// `badge`, `noIndex`, `className` and `isLast`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    /// Identifier of the docs plugin instance.
    pub plugin_id: String,
    /// Version name (e.g., "current").
    #[serde(rename = "version")]
    pub name: String,
    /// Human-readable label (e.g., "Next").
    pub label: String,
    /// Banner, `null` when none.
    pub banner: Option<VersionBanner>,
    /// Whether to show a version badge.
    pub badge: bool,
    /// Whether search engines should skip this version.
    pub no_index: bool,
    /// CSS class name.
    pub class_name: String,
    /// Whether this is the latest released version.
    pub is_last: bool,
}

impl VersionDescriptor {
    /// Create a descriptor with default flags and `docs-version-<name>` class.
    #[must_use]
    pub fn new(
        plugin_id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            plugin_id: plugin_id.into(),
            class_name: format!("docs-version-{name}"),
            label: label.into(),
            name,
            banner: None,
            badge: false,
            no_index: false,
            is_last: true,
        }
    }
}

impl Default for VersionDescriptor {
    fn default() -> Self {
        Self::new("default", "current", "Next")
    }
}
