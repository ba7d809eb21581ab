//! The suppression store.
//!
//! Rules live in one arena in the order they were added. Two index sets
//! split them by scope:
//!
//! - *local* rules name one concrete file and are keyed by that file
//! - *global* rules apply across files (no file, or a wildcard file pattern
//!   when glob matching is enabled)
//!
//! Match flags sit beside the arena as atomics, so a built store can be shared
//! by reference between worker threads.

use crate::error::SuppressionError;
use crate::line_format;
use crate::suppression::{Diagnostic, FileNameMatching, Suppression, UNUSED_FUNCTION_ID};
use crate::utils::paths::{from_native_separators, has_wildcards};
use crate::xml_format;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Scope of a rule within the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionScope {
    /// Applies to a single named file.
    Local,
    /// Applies across files.
    Global,
}

/// An ordered collection of suppression rules.
#[derive(Debug, Default)]
pub struct Suppressions {
    rules: Vec<Suppression>,
    matched: Vec<AtomicBool>,
    local: HashMap<String, Vec<usize>>,
    global: Vec<usize>,
    file_matching: FileNameMatching,
}

impl Suppressions {
    /// Creates an empty store with literal file-name matching.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given file-name matching mode.
    #[must_use]
    pub fn with_file_matching(file_matching: FileNameMatching) -> Self {
        Self {
            file_matching,
            ..Self::default()
        }
    }

    /// Returns the file-name matching mode.
    #[must_use]
    pub fn file_matching(&self) -> FileNameMatching {
        self.file_matching
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the store holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates a rule and appends it.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the store is left unchanged.
    pub fn add_suppression(&mut self, suppression: Suppression) -> Result<(), SuppressionError> {
        suppression.validate()?;

        let index = self.rules.len();
        match self.scope_of(&suppression) {
            SuppressionScope::Local => self
                .local
                .entry(suppression.file_name.clone())
                .or_default()
                .push(index),
            SuppressionScope::Global => self.global.push(index),
        }

        debug!("Added suppression {suppression}");
        self.matched.push(AtomicBool::new(suppression.matched));
        self.rules.push(suppression);
        Ok(())
    }

    /// Parses one `errorId[:fileName[:lineNumber]]` line and adds the rule.
    ///
    /// # Errors
    ///
    /// Returns the validation error for the parsed rule.
    pub fn add_suppression_line(&mut self, line: &str) -> Result<(), SuppressionError> {
        self.add_suppression(line_format::parse_line(line))
    }

    /// Reads a line-format source and adds its rules.
    ///
    /// Processing stops at the first invalid line. Rules added before it are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the source cannot be read, or the validation
    /// error of the first invalid line.
    pub fn parse_file<R: Read>(&mut self, mut reader: R) -> Result<(), SuppressionError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Adds the rules of line-format text.
    ///
    /// # Errors
    ///
    /// See [`Suppressions::parse_file`].
    pub fn parse_str(&mut self, content: &str) -> Result<(), SuppressionError> {
        let before = self.len();
        for line in line_format::rule_lines(content) {
            if let Err(e) = self.add_suppression_line(line) {
                warn!("Rejected suppression line {line:?}: {e}");
                return Err(e);
            }
        }
        info!("Loaded {} suppression(s)", self.len() - before);
        Ok(())
    }

    /// Reads an XML suppression document from disk and adds its rules.
    ///
    /// # Errors
    ///
    /// Returns [`SuppressionError::FileNotFound`] if the file cannot be read,
    /// otherwise see [`Suppressions::parse_xml`].
    pub fn parse_xml_file(&mut self, path: &Path) -> Result<(), SuppressionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            debug!("Cannot read {}: {e}", path.display());
            SuppressionError::FileNotFound {
                path: path.to_path_buf(),
            }
        })?;
        self.parse_xml(&content)
    }

    /// Adds the rules of an XML suppression document.
    ///
    /// Processing stops at the first rule with an invalid id. Rules added
    /// before it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SuppressionError::Xml`] for a malformed document, or the
    /// validation error of the first invalid rule.
    pub fn parse_xml(&mut self, content: &str) -> Result<(), SuppressionError> {
        let before = self.len();
        for rule in xml_format::parse_document(content)? {
            if let Err(e) = self.add_suppression(rule) {
                warn!("Rejected XML suppression: {e}");
                return Err(e);
            }
        }
        info!("Loaded {} XML suppression(s)", self.len() - before);
        Ok(())
    }

    /// Returns true if any rule matches the diagnostic.
    ///
    /// Rules are tried in insertion order and the first match is marked.
    #[must_use]
    pub fn is_suppressed(&self, diagnostic: &Diagnostic) -> bool {
        self.first_match(0..self.rules.len(), diagnostic)
    }

    /// Returns true if a rule local to the diagnostic's file matches it.
    ///
    /// Only rules naming that exact file are tried, in insertion order.
    #[must_use]
    pub fn is_suppressed_local(&self, diagnostic: &Diagnostic) -> bool {
        let Some(indices) = self.local.get(&diagnostic.file_name) else {
            return false;
        };
        self.first_match(indices.iter().copied(), diagnostic)
    }

    fn first_match(
        &self,
        indices: impl IntoIterator<Item = usize>,
        diagnostic: &Diagnostic,
    ) -> bool {
        for index in indices {
            if self.rules[index].matches(diagnostic, self.file_matching) {
                debug!("{} suppressed by {}", diagnostic, self.rules[index]);
                self.matched[index].store(true, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    /// Returns the local rules for `file` that never matched.
    ///
    /// `unusedFunction` rules are left out unless `unused_function_checking`
    /// is set.
    #[must_use]
    pub fn unmatched_local_suppressions(
        &self,
        file: &str,
        unused_function_checking: bool,
    ) -> Vec<Suppression> {
        self.local
            .get(&from_native_separators(file))
            .map(|indices| self.unmatched(indices, unused_function_checking))
            .unwrap_or_default()
    }

    /// Returns the global rules that never matched.
    ///
    /// `unusedFunction` rules are left out unless `unused_function_checking`
    /// is set.
    #[must_use]
    pub fn unmatched_global_suppressions(
        &self,
        unused_function_checking: bool,
    ) -> Vec<Suppression> {
        self.unmatched(&self.global, unused_function_checking)
    }

    fn unmatched(&self, indices: &[usize], unused_function_checking: bool) -> Vec<Suppression> {
        indices
            .iter()
            .copied()
            .filter(|&i| !self.matched[i].load(Ordering::Relaxed))
            .filter(|&i| {
                unused_function_checking || self.rules[i].error_id != UNUSED_FUNCTION_ID
            })
            .map(|i| self.snapshot(i))
            .collect()
    }

    /// Returns every rule in insertion order, with its current match flag.
    #[must_use]
    pub fn suppressions(&self) -> Vec<Suppression> {
        (0..self.rules.len()).map(|i| self.snapshot(i)).collect()
    }

    /// Returns the scope a rule is stored under.
    #[must_use]
    pub fn scope_of(&self, suppression: &Suppression) -> SuppressionScope {
        let concrete_file = suppression.has_file()
            && (self.file_matching == FileNameMatching::Literal
                || !has_wildcards(&suppression.file_name));
        if concrete_file {
            SuppressionScope::Local
        } else {
            SuppressionScope::Global
        }
    }

    /// Merges match flags recorded by another store built from the same
    /// sources, e.g. a per-worker copy.
    ///
    /// Flags are OR-ed by position. Rules beyond the shorter store are
    /// ignored.
    pub fn merge_matched(&mut self, other: &Suppressions) {
        for (mine, theirs) in self.matched.iter().zip(&other.matched) {
            if theirs.load(Ordering::Relaxed) {
                mine.store(true, Ordering::Relaxed);
            }
        }
    }

    fn snapshot(&self, index: usize) -> Suppression {
        let mut rule = self.rules[index].clone();
        rule.matched = self.matched[index].load(Ordering::Relaxed);
        rule
    }
}
