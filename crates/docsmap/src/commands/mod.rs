//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docsmap_config::{Banner, CliSettings, Config};
use docsmap_site::{
    BuildOptions, CategoryDefaults, SidebarDeclarations, SiteIndexer, VersionBanner,
    VersionDescriptor, VersionMetadata,
};
use docsmap_storage::Storage;
use docsmap_storage_fs::FsStorage;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use show::ShowArgs;

/// Arguments shared by every command that builds the index.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover docsmap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebar declaration file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Enable verbose output (show build timings).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ProjectArgs {
    /// Load configuration, applying `output_path` on top of the flags here.
    pub(crate) fn load_config(&self, output_path: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebar_path: self.sidebars.clone(),
            output_path,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config_path = ?config.config_path,
            source_dir = %config.docs_resolved.source_dir.display(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Build the index described by `config`.
pub(crate) fn build_index(config: &Config) -> Result<VersionMetadata, CliError> {
    let declarations = SidebarDeclarations::load(&config.docs_resolved.sidebar_path)?;
    let storage: Arc<dyn Storage> =
        Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
    let indexer = SiteIndexer::new(storage, build_options(config));
    Ok(indexer.build(&declarations)?)
}

/// Translate configuration into build options.
fn build_options(config: &Config) -> BuildOptions {
    let version = &config.version;
    BuildOptions {
        route_base_path: config.docs_resolved.route_base_path.clone(),
        category_defaults: CategoryDefaults {
            collapsed: config.sidebar.collapsed,
            collapsible: config.sidebar.collapsible,
        },
        version: VersionDescriptor {
            plugin_id: version.plugin_id.clone(),
            name: version.name.clone(),
            label: version.label.clone(),
            banner: match version.banner {
                Banner::None => None,
                Banner::Unreleased => Some(VersionBanner::Unreleased),
                Banner::Unmaintained => Some(VersionBanner::Unmaintained),
            },
            badge: version.badge,
            no_index: version.no_index,
            class_name: version.class_name(),
            is_last: version.is_last,
        },
    }
}
