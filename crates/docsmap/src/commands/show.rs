//! `docsmap show` command implementation.

use clap::Args;
use docsmap_site::PageRecord;

use super::{ProjectArgs, build_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Page id to show (e.g., "overview/getting_started").
    page_id: String,

    #[command(flatten)]
    pub(crate) project: ProjectArgs,
}

fn describe(page: Option<&PageRecord>) -> String {
    match page {
        Some(page) if page.title.is_empty() => page.id.clone(),
        Some(page) => format!("{} ({})", page.id, page.title),
        None => "-".to_owned(),
    }
}

impl ShowArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(None)?;
        let metadata = build_index(&config)?;

        let page = metadata
            .page(&self.page_id)
            .ok_or_else(|| CliError::PageNotFound(self.page_id.clone()))?;
        let neighbors = metadata.neighbors(&page.id);

        output.highlight(&page.id);
        output.field("Title", &page.title);
        output.field("Description", &page.description);
        output.field("Sidebar", page.sidebar.as_deref().unwrap_or("-"));
        output.field("Permalink", &page.permalink);
        output.field("Source", &page.source_path);
        output.field("Previous", &describe(neighbors.previous));
        output.field("Next", &describe(neighbors.next));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::write_project;

    fn args(page_id: &str, config: std::path::PathBuf) -> ShowArgs {
        ShowArgs {
            page_id: page_id.to_owned(),
            project: ProjectArgs {
                config: Some(config),
                source_dir: None,
                sidebars: None,
                verbose: false,
            },
        }
    }

    #[test]
    fn test_show_known_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_project(temp_dir.path());

        args("overview/example", config_path).execute().unwrap();
    }

    #[test]
    fn test_show_unknown_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_project(temp_dir.path());

        let err = args("missing", config_path).execute().unwrap_err();

        assert!(matches!(err, CliError::PageNotFound(ref id) if id == "missing"));
        assert_eq!(err.to_string(), "Page not found: missing");
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(None), "-");
    }
}
