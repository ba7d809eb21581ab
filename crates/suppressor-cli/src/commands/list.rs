//! List command implementation.

use anyhow::{Context, Result};
use suppressor_core::Suppression;

use crate::config_resolver::ConfigSource;
use crate::SourceArgs;

/// Runs the list command.
pub fn run(sources: &SourceArgs, source: &ConfigSource) -> Result<()> {
    let filter = super::filter_builder(sources, source)?
        .build()
        .context("Failed to load suppressions")?;
    let suppressions = filter.suppressions();

    println!(
        "{:<30} {:<30} {:<6} {:<16} Scope",
        "Id", "File", "Line", "Symbol"
    );
    println!("{}", "-".repeat(90));

    for rule in suppressions.suppressions() {
        println!(
            "{:<30} {:<30} {:<6} {:<16} {:?}",
            rule.error_id,
            or_any(&rule.file_name),
            line_label(&rule),
            or_any(&rule.symbol_name),
            suppressions.scope_of(&rule),
        );
    }

    println!("\n{} rule(s)", suppressions.len());
    Ok(())
}

fn or_any(value: &str) -> &str {
    if value.is_empty() {
        "*"
    } else {
        value
    }
}

fn line_label(rule: &Suppression) -> String {
    if rule.line_number > 0 {
        rule.line_number.to_string()
    } else {
        "*".to_string()
    }
}
