//! YAML front matter of a documentation page.

use serde::Deserialize;

/// Front matter fields that affect the page registry and the sidebar.
///
/// Unknown keys are ignored so documents written for richer site generators
/// (tags, keywords, custom_edit_url, ...) index without complaint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Overrides the file-name part of the page id.
    pub id: Option<String>,
    /// Page title (overrides the first H1).
    pub title: Option<String>,
    /// Page description (overrides the first paragraph).
    pub description: Option<String>,
    /// Label used when the page appears in a sidebar.
    pub sidebar_label: Option<String>,
    /// Ordering key inside autogenerated sidebars.
    pub sidebar_position: Option<f64>,
    /// URL slug, absolute (`/x`) or relative to the document's directory.
    pub slug: Option<String>,
}

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// YAML parsing error.
    #[error("Invalid front matter: {0}")]
    Parse(String),
    /// `id` must be a single non-empty path segment.
    #[error("Invalid front matter id `{0}`: ids must be a non-empty name without `/`")]
    InvalidId(String),
}

impl FrontMatter {
    /// Parse front matter from the YAML between the `---` fences.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or `id` contains a slash.
    pub fn from_yaml(content: &str) -> Result<Self, FrontMatterError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let front_matter: Self =
            serde_yaml::from_str(trimmed).map_err(|e| FrontMatterError::Parse(e.to_string()))?;

        if let Some(id) = &front_matter.id
            && (id.trim().is_empty() || id.contains('/'))
        {
            return Err(FrontMatterError::InvalidId(id.clone()));
        }

        Ok(front_matter)
    }
}
