//! Configuration types for suppressor.

use crate::suppression::FileNameMatching;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for suppressor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where suppression rules come from.
    #[serde(default)]
    pub suppressions: SuppressionsConfig,

    /// What the end-of-run report contains.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// Relative source paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.suppressions.rebase(base);
        }
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Suppression sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuppressionsConfig {
    /// Line-format files. Glob patterns are expanded.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// XML files. Glob patterns are expanded.
    #[serde(default)]
    pub xml: Vec<PathBuf>,

    /// Inline rules in line format (e.g., `"uninitvar:src/a.c:10"`).
    #[serde(default)]
    pub rules: Vec<String>,

    /// How rule file names are compared with diagnostic file names.
    #[serde(default)]
    pub file_name_matching: FileNameMatching,
}

impl SuppressionsConfig {
    fn rebase(&mut self, base: &Path) {
        for path in self.files.iter_mut().chain(self.xml.iter_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Report options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Whether unmatched suppressions are reported.
    #[serde(default = "default_true")]
    pub unmatched: bool,

    /// Whether unused-function checking ran, which makes `unusedFunction`
    /// rules eligible for unmatched reporting.
    #[serde(default)]
    pub unused_function_checking: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            unmatched: true,
            unused_function_checking: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
