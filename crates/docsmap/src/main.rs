//! docsmap CLI - navigation index builder for documentation sites.
//!
//! Provides commands for:
//! - `build`: Build the index and write it as JSON
//! - `check`: Build the index without writing it
//! - `show`: Print one page record with its previous/next pages

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, ShowArgs};
use output::Output;

/// docsmap - Navigation index builder for documentation sites.
#[derive(Parser)]
#[command(name = "docsmap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and write it to the output file.
    Build(BuildArgs),
    /// Build the index without writing it and report counts.
    Check(CheckArgs),
    /// Show one page with its previous and next pages.
    Show(ShowArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.project.verbose,
            Self::Check(args) => args.project.verbose,
            Self::Show(args) => args.project.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
