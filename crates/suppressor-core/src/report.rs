//! Results of filtering a run's diagnostics.

use crate::suppression::{Diagnostic, Suppression};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Id under which unmatched suppressions are reported.
pub const UNMATCHED_SUPPRESSION_ID: &str = "unmatchedSuppression";

/// Outcome of passing a run's diagnostics through the suppression rules.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilterReport {
    /// Diagnostics no rule suppressed, in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of diagnostics that were suppressed.
    pub suppressed: usize,
    /// Rules that never matched. Local rules come first, grouped by file,
    /// followed by global rules.
    pub unmatched: Vec<Suppression>,
}

impl FilterReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if nothing remains to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.unmatched.is_empty()
    }

    /// Returns true if any diagnostic survived filtering.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics that were checked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.diagnostics.len() + self.suppressed
    }

    /// Formats an unmatched rule as an information finding.
    #[must_use]
    pub fn format_unmatched(rule: &Suppression) -> String {
        let file = if rule.file_name.is_empty() {
            "*"
        } else {
            rule.file_name.as_str()
        };
        let location = if rule.line_number > 0 {
            format!("{file}:{}", rule.line_number)
        } else {
            file.to_string()
        };
        format!(
            "{location}: information: Unmatched suppression: {} [{UNMATCHED_SUPPRESSION_ID}]",
            rule.error_id
        )
    }

    /// Renders the whole report as text, one finding per line, followed by a
    /// summary line.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            let _ = writeln!(out, "{diagnostic}");
        }
        for rule in &self.unmatched {
            let _ = writeln!(out, "{}", Self::format_unmatched(rule));
        }
        let _ = writeln!(
            out,
            "{} diagnostic(s) reported, {} suppressed, {} unmatched suppression(s)",
            self.diagnostics.len(),
            self.suppressed,
            self.unmatched.len()
        );
        out
    }

    /// Adds the findings of another report.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.suppressed += other.suppressed;
        self.unmatched.extend(other.unmatched);
    }
}
