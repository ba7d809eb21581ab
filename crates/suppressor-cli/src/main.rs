//! suppressor CLI tool.
//!
//! Usage:
//! ```bash
//! suppressor check [OPTIONS] <DIAGNOSTICS>
//! suppressor list [OPTIONS]
//! suppressor init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Filters static analysis diagnostics through suppression rules
#[derive(Parser)]
#[command(name = "suppressor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a run's diagnostics and report unmatched suppressions
    Check {
        /// Diagnostics as a JSON array or JSON lines ("-" for stdin)
        diagnostics: PathBuf,

        #[command(flatten)]
        sources: SourceArgs,

        /// Files that were analyzed; their unmatched local rules are reported
        #[arg(long = "file")]
        files: Vec<String>,

        /// Unused-function checking ran, so report unmatched unusedFunction rules
        #[arg(long)]
        unused_function_checking: bool,

        /// Do not report unmatched suppressions
        #[arg(long)]
        no_unmatched: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse the suppression sources and list the rules
    List {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Suppression sources given on the command line, added after the config's.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Line-format suppression file (repeatable, glob patterns allowed)
    #[arg(long = "suppressions")]
    pub files: Vec<PathBuf>,

    /// XML suppression file (repeatable)
    #[arg(long = "suppressions-xml")]
    pub xml: Vec<PathBuf>,

    /// Inline rule `errorId[:fileName[:lineNumber]]` (repeatable)
    #[arg(long = "suppress")]
    pub rules: Vec<String>,

    /// Match rule file names as `*`/`?` wildcard patterns
    #[arg(long)]
    pub glob_file_names: bool,
}

/// Output format for filter results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()?;
    let source = config_resolver::resolve(&cwd, cli.config.as_deref());

    match cli.command {
        Commands::Check {
            diagnostics,
            sources,
            files,
            unused_function_checking,
            no_unmatched,
            format,
        } => {
            let options = commands::check::CheckOptions {
                unused_function_checking,
                no_unmatched,
                files,
                format,
            };
            commands::check::run(&diagnostics, &sources, &options, &source)
        }
        Commands::List { sources } => commands::list::run(&sources, &source),
        Commands::Init { force } => commands::init::run(force),
    }
}
