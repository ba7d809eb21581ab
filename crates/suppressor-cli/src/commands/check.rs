//! Check command implementation.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use suppressor_core::Diagnostic;

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, SourceArgs};

/// Options of the check command that do not name suppression sources.
#[derive(Debug)]
pub struct CheckOptions {
    /// Unused-function checking ran.
    pub unused_function_checking: bool,
    /// Skip the unmatched-suppression report.
    pub no_unmatched: bool,
    /// Analyzed files, beyond those named by diagnostics.
    pub files: Vec<String>,
    /// Output format.
    pub format: OutputFormat,
}

/// Runs the check command.
pub fn run(
    diagnostics_path: &Path,
    sources: &SourceArgs,
    options: &CheckOptions,
    source: &ConfigSource,
) -> Result<()> {
    let mut builder = super::filter_builder(sources, source)?;
    if options.unused_function_checking {
        builder = builder.unused_function_checking(true);
    }
    if options.no_unmatched {
        builder = builder.report_unmatched(false);
    }
    let filter = builder.build().context("Failed to load suppressions")?;

    let diagnostics = read_diagnostics(diagnostics_path)?;

    tracing::info!(
        "Filtering {} diagnostic(s) with {} rule(s)",
        diagnostics.len(),
        filter.suppressions().len()
    );

    let report = filter.apply(diagnostics, &options.files);

    super::output::print(&report, options.format)?;

    // Exit with error code if findings survived
    if report.has_diagnostics() {
        std::process::exit(1);
    }

    Ok(())
}

fn read_diagnostics(path: &Path) -> Result<Vec<Diagnostic>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read diagnostics from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diagnostics: {}", path.display()))?
    };
    parse_diagnostics(&content)
}

/// Parses a JSON array of diagnostics, or one JSON object per line.
fn parse_diagnostics(content: &str) -> Result<Vec<Diagnostic>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Invalid diagnostics JSON array");
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid diagnostic on line {}", i + 1))
        })
        .collect()
}
