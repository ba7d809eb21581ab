//! Loading suppression sources and filtering a run's diagnostics.

use crate::config::Config;
use crate::error::SuppressionError;
use crate::report::FilterReport;
use crate::suppression::{Diagnostic, FileNameMatching, Suppression};
use crate::suppressions::Suppressions;
use crate::utils::paths::{from_native_separators, has_wildcards};

use miette::Diagnostic as MietteDiagnostic;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while building a filter.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum FilterError {
    /// A suppression source was rejected.
    #[error("{origin}: {source}")]
    #[diagnostic(code(suppressor::source))]
    Source {
        /// File path, or `inline` for rules given as strings.
        origin: String,
        /// Underlying error.
        #[diagnostic_source]
        source: SuppressionError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    #[diagnostic(code(suppressor::glob))]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring a [`SuppressionFilter`].
#[derive(Default)]
pub struct SuppressionFilterBuilder {
    line_files: Vec<PathBuf>,
    xml_files: Vec<PathBuf>,
    rules: Vec<String>,
    config: Option<Config>,
    file_matching: Option<FileNameMatching>,
    unused_function_checking: Option<bool>,
    report_unmatched: Option<bool>,
}

impl SuppressionFilterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line-format suppression file (or glob pattern).
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.line_files.push(path.into());
        self
    }

    /// Adds an XML suppression file (or glob pattern).
    #[must_use]
    pub fn xml_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.xml_files.push(path.into());
        self
    }

    /// Adds an inline rule in line format.
    #[must_use]
    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Adds multiple inline rules.
    #[must_use]
    pub fn rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration. Its sources are loaded before the builder's.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the file-name matching mode.
    #[must_use]
    pub fn file_matching(mut self, mode: FileNameMatching) -> Self {
        self.file_matching = Some(mode);
        self
    }

    /// Overrides whether unused-function checking ran.
    #[must_use]
    pub fn unused_function_checking(mut self, enabled: bool) -> Self {
        self.unused_function_checking = Some(enabled);
        self
    }

    /// Overrides whether unmatched suppressions are reported.
    #[must_use]
    pub fn report_unmatched(mut self, enabled: bool) -> Self {
        self.report_unmatched = Some(enabled);
        self
    }

    /// Loads every source and builds the filter.
    ///
    /// # Errors
    ///
    /// Returns the first source that fails to load.
    pub fn build(self) -> Result<SuppressionFilter, FilterError> {
        let config = self.config.unwrap_or_default();

        let file_matching = self
            .file_matching
            .unwrap_or(config.suppressions.file_name_matching);
        let mut suppressions = Suppressions::with_file_matching(file_matching);

        let line_files = config.suppressions.files.iter().chain(&self.line_files);
        for path in expand_patterns(line_files)? {
            load_line_file(&mut suppressions, &path)?;
        }

        let xml_files = config.suppressions.xml.iter().chain(&self.xml_files);
        for path in expand_patterns(xml_files)? {
            debug!("Loading XML suppressions from {}", path.display());
            suppressions
                .parse_xml_file(&path)
                .map_err(|source| FilterError::Source {
                    origin: path.display().to_string(),
                    source,
                })?;
        }

        for rule in config.suppressions.rules.iter().chain(&self.rules) {
            suppressions
                .add_suppression_line(rule)
                .map_err(|source| FilterError::Source {
                    origin: "inline".to_string(),
                    source,
                })?;
        }

        info!("Loaded {} suppression rule(s)", suppressions.len());

        Ok(SuppressionFilter {
            suppressions,
            unused_function_checking: self
                .unused_function_checking
                .unwrap_or(config.report.unused_function_checking),
            report_unmatched: self.report_unmatched.unwrap_or(config.report.unmatched),
        })
    }
}

fn load_line_file(suppressions: &mut Suppressions, path: &Path) -> Result<(), FilterError> {
    debug!("Loading suppressions from {}", path.display());
    std::fs::File::open(path)
        .map_err(SuppressionError::from)
        .and_then(|file| suppressions.parse_file(file))
        .map_err(|source| FilterError::Source {
            origin: path.display().to_string(),
            source,
        })
}

/// Expands glob patterns; plain paths pass through untouched so a missing
/// file is reported by the loader.
fn expand_patterns<'a>(
    paths: impl IntoIterator<Item = &'a PathBuf>,
) -> Result<Vec<PathBuf>, FilterError> {
    let mut out = Vec::new();
    for path in paths {
        let pattern = path.to_string_lossy();
        if !has_wildcards(&pattern) {
            out.push(path.clone());
            continue;
        }

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in glob::glob(&pattern)? {
            let entry = entry.map_err(|e| FilterError::Source {
                origin: pattern.to_string(),
                source: SuppressionError::Io(e.into_error()),
            })?;
            matched.push(entry);
        }
        if matched.is_empty() {
            warn!("No suppression files match {pattern}");
        }
        matched.sort();
        out.extend(matched);
    }
    Ok(out)
}

/// Decides which diagnostics of a run are suppressed.
///
/// Use [`SuppressionFilter::builder()`] to construct an instance.
#[derive(Debug)]
pub struct SuppressionFilter {
    suppressions: Suppressions,
    unused_function_checking: bool,
    report_unmatched: bool,
}

impl SuppressionFilter {
    /// Creates a new builder for configuring a filter.
    #[must_use]
    pub fn builder() -> SuppressionFilterBuilder {
        SuppressionFilterBuilder::new()
    }

    /// Wraps an already populated store.
    #[must_use]
    pub fn from_suppressions(suppressions: Suppressions) -> Self {
        Self {
            suppressions,
            unused_function_checking: false,
            report_unmatched: true,
        }
    }

    /// Returns the loaded rules.
    #[must_use]
    pub fn suppressions(&self) -> &Suppressions {
        &self.suppressions
    }

    /// Returns true if the diagnostic is suppressed, marking the rule that
    /// matched.
    #[must_use]
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        self.suppressions.is_suppressed(diagnostic)
    }

    /// Filters a run's diagnostics.
    ///
    /// `checked_files` names files that were analyzed even if they produced
    /// no diagnostics; their local rules are included in the unmatched
    /// report. Match flags accumulate across calls.
    pub fn apply<I>(&self, diagnostics: I, checked_files: &[String]) -> FilterReport
    where
        I: IntoIterator<Item = Diagnostic>,
    {
        let mut report = FilterReport::new();
        let mut files: BTreeSet<String> = checked_files
            .iter()
            .map(|f| from_native_separators(f))
            .collect();

        for diagnostic in diagnostics {
            if !diagnostic.file_name.is_empty() {
                files.insert(diagnostic.file_name.clone());
            }
            if self.is_suppressed(&diagnostic) {
                report.suppressed += 1;
            } else {
                report.diagnostics.push(diagnostic);
            }
        }

        if self.report_unmatched {
            report.unmatched = self.unmatched(files.iter().map(String::as_str));
        }

        info!(
            "Filtered {} diagnostic(s): {} suppressed, {} unmatched rule(s)",
            report.total(),
            report.suppressed,
            report.unmatched.len()
        );

        report
    }

    /// Returns the rules that never matched: local rules of each given file,
    /// then global rules.
    pub fn unmatched<'a>(&self, files: impl IntoIterator<Item = &'a str>) -> Vec<Suppression> {
        let mut result: Vec<Suppression> = files
            .into_iter()
            .flat_map(|file| {
                self.suppressions
                    .unmatched_local_suppressions(file, self.unused_function_checking)
            })
            .collect();
        result.extend(
            self.suppressions
                .unmatched_global_suppressions(self.unused_function_checking),
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_inline_rules() {
        let filter = SuppressionFilter::builder()
            .rule("nullPointer")
            .rules(["uninitvar:a.c:3"])
            .build()
            .expect("Failed to build filter");
        assert_eq!(filter.suppressions().len(), 2);
    }

    #[test]
    fn test_builder_reports_inline_origin() {
        let err = SuppressionFilter::builder()
            .rule("bad id")
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "inline: Failed to add suppression. Invalid id \"bad id\""
        );
    }

    #[test]
    fn test_apply() {
        let filter = SuppressionFilter::builder()
            .rules(["nullPointer:a.c", "memleak", "uninitvar:c.c"])
            .build()
            .unwrap();

        let report = filter.apply(
            vec![
                Diagnostic::new("nullPointer", "a.c", 1),
                Diagnostic::new("nullPointer", "b.c", 1),
            ],
            &["c.c".to_string()],
        );

        assert_eq!(report.suppressed, 1);
        assert_eq!(report.diagnostics, vec![Diagnostic::new("nullPointer", "b.c", 1)]);
        assert_eq!(
            report.unmatched,
            vec![
                Suppression::new("uninitvar").with_file_name("c.c"),
                Suppression::new("memleak"),
            ]
        );
    }

    #[test]
    fn test_apply_without_unmatched_report() {
        let filter = SuppressionFilter::builder()
            .rule("memleak")
            .report_unmatched(false)
            .build()
            .unwrap();
        let report = filter.apply(Vec::new(), &[]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_config_overrides() {
        let mut config = Config::default();
        config.suppressions.rules = vec!["unusedFunction".to_string()];
        config.report.unused_function_checking = true;

        let filter = SuppressionFilter::builder()
            .config(config.clone())
            .build()
            .unwrap();
        assert_eq!(filter.apply(Vec::new(), &[]).unmatched.len(), 1);

        let filter = SuppressionFilter::builder()
            .config(config)
            .unused_function_checking(false)
            .build()
            .unwrap();
        assert!(filter.apply(Vec::new(), &[]).unmatched.is_empty());
    }

    #[test]
    fn test_from_suppressions() {
        let mut suppressions = Suppressions::new();
        suppressions.add_suppression_line("uninitvar:a.c:4").unwrap();
        let filter = SuppressionFilter::from_suppressions(suppressions);

        assert!(filter.is_suppressed(&Diagnostic::new("uninitvar", "a.c", 4)));
        assert!(filter.unmatched(["a.c"]).is_empty());
    }

    #[test]
    fn test_missing_line_file() {
        let err = SuppressionFilter::builder()
            .file("/nonexistent/suppressions.txt")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FilterError::Source {
                source: SuppressionError::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let err = SuppressionFilter::builder()
            .file("rules/[*.txt")
            .build()
            .unwrap_err();
        assert!(matches!(err, FilterError::Glob(_)));
    }
}
