//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# suppressor configuration

[suppressions]
# Line-format files: one `errorId[:fileName[:lineNumber]]` rule per line.
# Glob patterns are expanded; relative paths are resolved from this file.
files = []

# XML files with <suppress> elements
xml = []

# Inline rules in line format
rules = [
    # "uninitvar:src/legacy.c:10",
]

# "literal" compares file names exactly, "glob" allows * and ? in rule file names
file_name_matching = "literal"

[report]
# Report suppressions that never matched a diagnostic
unmatched = true

# Set when unused-function checking ran, so unusedFunction rules can be reported
unused_function_checking = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("suppressor.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created suppressor.toml");
    println!("\nNext steps:");
    println!("  1. Add suppression files or rules to suppressor.toml");
    println!("  2. Run: suppressor check diagnostics.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = suppressor_core::Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.suppressions.rules.is_empty());
        assert!(config.report.unmatched);
    }
}
