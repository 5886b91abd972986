//! `docsmap build` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use super::{ProjectArgs, build_index};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub(crate) project: ProjectArgs,

    /// Output file for the index (default: build/docs-metadata.json).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config(self.output)?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!(
            "Sidebars: {}",
            config.docs_resolved.sidebar_path.display()
        ));

        let metadata = build_index(&config)?;
        let json = metadata.to_json()?;

        if let Some(parent) = config.output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config.output_path, json)?;

        output.success(&format!(
            "Indexed {} pages in {} sidebars to {}",
            metadata.docs.len(),
            metadata.docs_sidebars.len(),
            config.output_path.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use crate::Cli;
    use crate::Commands;
    use crate::commands::tests::write_project;

    #[test]
    fn test_build_writes_artifact() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_project(temp_dir.path());
        let out = temp_dir.path().join("out/meta.json");

        let cli = Cli::try_parse_from([
            "docsmap",
            "build",
            "--config",
            config_path.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        args.execute().unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.ends_with("}\n"));
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["banner"], "unreleased");
        assert_eq!(
            json["docsSidebars"]["docs"][0]["items"][1]["href"],
            "/gql/docs/overview/getting_started"
        );
    }

    #[test]
    fn test_build_default_output_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = write_project(temp_dir.path());

        let cli = Cli::try_parse_from(["docsmap", "build", "-c", config_path.to_str().unwrap()])
            .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        args.execute().unwrap();

        assert!(temp_dir.path().join("build/docs-metadata.json").exists());
    }
}
