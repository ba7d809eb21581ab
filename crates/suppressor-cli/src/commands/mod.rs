//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list;
pub mod output;

use anyhow::{Context, Result};
use suppressor_core::{Config, FileNameMatching, SuppressionFilter, SuppressionFilterBuilder};

use crate::config_resolver::ConfigSource;
use crate::SourceArgs;

/// Loads the resolved config and adds the command-line sources after it.
fn filter_builder(
    sources: &SourceArgs,
    source: &ConfigSource,
) -> Result<SuppressionFilterBuilder> {
    let config = match source.path() {
        None => Config::default(),
        Some(p) => {
            if matches!(source, ConfigSource::User(_)) {
                tracing::info!("Using user config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let mut builder = SuppressionFilter::builder().config(config);
    for path in &sources.files {
        builder = builder.file(path);
    }
    for path in &sources.xml {
        builder = builder.xml_file(path);
    }
    builder = builder.rules(sources.rules.iter().cloned());
    if sources.glob_file_names {
        builder = builder.file_matching(FileNameMatching::Glob);
    }

    Ok(builder)
}
