//! Configuration management for docsmap.
//!
//! Parses `docsmap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.route_base_path`
//! - `version.label`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebar declaration file.
    pub sidebar_path: Option<PathBuf>,
    /// Override output artifact path.
    pub output_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docsmap.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Category defaults for sidebar declarations.
    pub sidebar: SidebarConfig,
    /// Version descriptor of the documentation being indexed.
    pub version: VersionConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved output artifact path (set after loading).
    #[serde(skip)]
    pub output_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    sidebar_path: Option<String>,
    route_base_path: Option<String>,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    path: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Sidebar declaration file (YAML or JSON).
    pub sidebar_path: PathBuf,
    /// URL prefix of every document permalink (e.g., "/docs").
    pub route_base_path: String,
}

/// Defaults applied to categories that do not set the flags themselves.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Whether categories start collapsed.
    pub collapsed: bool,
    /// Whether categories can be collapsed at all.
    pub collapsible: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            collapsed: true,
            collapsible: true,
        }
    }
}

/// Banner shown above the pages of a version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Banner {
    /// No banner.
    #[default]
    None,
    /// Version not released yet.
    Unreleased,
    /// Version no longer maintained.
    Unmaintained,
}

/// Version descriptor configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Identifier of the docs plugin instance.
    pub plugin_id: String,
    /// Version name (e.g., "current", "1.2.0").
    pub name: String,
    /// Human-readable label (e.g., "Next").
    pub label: String,
    /// Banner shown above the pages of this version.
    pub banner: Banner,
    /// Whether to show a version badge.
    pub badge: bool,
    /// Whether search engines should skip this version.
    pub no_index: bool,
    /// Whether this is the latest released version.
    pub is_last: bool,
    /// CSS class name; defaults to `docs-version-<name>`.
    pub class_name: Option<String>,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            plugin_id: "default".to_owned(),
            name: "current".to_owned(),
            label: "Next".to_owned(),
            banner: Banner::None,
            badge: false,
            no_index: false,
            is_last: true,
            class_name: None,
        }
    }
}

impl VersionConfig {
    /// Resolved CSS class name.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| format!("docs-version-{}", self.name))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`version.label`").
        field: String,
        /// Error message (e.g., "${`DOCS_LABEL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docsmap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebar_path) = &settings.sidebar_path {
            self.docs_resolved.sidebar_path.clone_from(sidebar_path);
        }
        if let Some(output_path) = &settings.output_path {
            self.output_path.clone_from(output_path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            docs: DocsConfigRaw::default(),
            output: OutputConfigRaw::default(),
            sidebar: SidebarConfig::default(),
            version: VersionConfig::default(),
            docs_resolved: DocsConfig::default(),
            output_path: PathBuf::new(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.docs_resolved.route_base_path;
        if !base.is_empty() && !base.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "docs.route_base_path must start with '/', got '{base}'"
            )));
        }

        require_non_empty(&self.version.plugin_id, "version.plugin_id")?;
        require_non_empty(&self.version.name, "version.name")?;
        require_non_empty(&self.version.label, "version.label")?;
        if let Some(class_name) = &self.version.class_name {
            require_non_empty(class_name, "version.class_name")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref base) = self.docs.route_base_path {
            self.docs.route_base_path = Some(expand::expand_env(base, "docs.route_base_path")?);
        }
        self.version.label = expand::expand_env(&self.version.label, "version.label")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebar_path: resolve(self.docs.sidebar_path.as_deref(), "sidebars.yaml"),
            route_base_path: normalize_base_path(self.docs.route_base_path.as_deref().unwrap_or("/docs")),
        };
        self.output_path = resolve(self.output.path.as_deref(), "build/docs-metadata.json");
    }
}

/// Strip trailing slashes so permalinks join with a single `/`.
///
/// The root path `/` normalizes to the empty string.
fn normalize_base_path(path: &str) -> String {
    path.trim_end_matches('/').to_owned()
}
