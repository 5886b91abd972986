//! `docsmap check` command implementation.

use clap::Args;
use docsmap_site::VersionMetadata;

use super::{ProjectArgs, build_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

/// Counts reported by `check`.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    pages: usize,
    sidebars: usize,
    unlisted: Vec<String>,
}

impl Summary {
    fn of(metadata: &VersionMetadata) -> Self {
        Self {
            pages: metadata.docs.len(),
            sidebars: metadata.docs_sidebars.len(),
            unlisted: metadata
                .docs
                .iter()
                .filter(|page| page.sidebar.is_none())
                .map(|page| page.id.clone())
                .collect(),
        }
    }
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(None)?;
        let metadata = build_index(&config)?;
        let summary = Summary::of(&metadata);

        for id in &summary.unlisted {
            output.warning(&format!("Page {id} is not part of any sidebar"));
        }
        output.success(&format!(
            "OK: {} pages, {} sidebars ({} not in a sidebar)",
            summary.pages,
            summary.sidebars,
            summary.unlisted.len()
        ));
        Ok(())
    }
}
