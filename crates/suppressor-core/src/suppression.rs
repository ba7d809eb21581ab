//! Suppression rules and the diagnostics they are matched against.

use crate::error::SuppressionError;
use crate::utils::glob;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error id that matches every kind of diagnostic.
pub const ANY_ERROR_ID: &str = "*";

/// Error id reserved for unused-function diagnostics.
///
/// Rules for this id are left out of unmatched reports unless unused-function
/// checking was enabled for the run.
pub const UNUSED_FUNCTION_ID: &str = "unusedFunction";

/// How a rule's file name is compared with a diagnostic's file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNameMatching {
    /// Exact string equality.
    #[default]
    Literal,
    /// The rule file name is a `*`/`?` wildcard pattern.
    Glob,
}

/// A finding reported by the analysis engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic kind (e.g., "nullPointer").
    pub error_id: String,
    /// File path with `/` separators.
    #[serde(default)]
    pub file_name: String,
    /// Line number (1-indexed).
    #[serde(default)]
    pub line_number: u32,
    /// Symbol tokens, each followed by `\n` (including the last).
    #[serde(default)]
    pub symbol_names: String,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic without symbols or message.
    #[must_use]
    pub fn new(
        error_id: impl Into<String>,
        file_name: impl Into<String>,
        line_number: u32,
    ) -> Self {
        Self {
            error_id: error_id.into(),
            file_name: file_name.into(),
            line_number,
            symbol_names: String::new(),
            message: String::new(),
        }
    }

    /// Appends a symbol token.
    #[must_use]
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol_names.push_str(symbol);
        self.symbol_names.push('\n');
        self
    }

    /// Sets the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Iterates over the symbol tokens.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbol_names.lines().filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file_name, self.line_number, self.error_id, self.message
        )
    }
}

/// One exemption rule.
///
/// Each constrained field must agree with the diagnostic for the rule to
/// match; an unconstrained field (`*`/empty id, empty file, line `0`, empty
/// symbol) accepts anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    /// Diagnostic kind, or `*` for any kind.
    pub error_id: String,
    /// File the rule applies to; empty for any file.
    #[serde(default)]
    pub file_name: String,
    /// Line the rule applies to; `0` for any line.
    #[serde(default)]
    pub line_number: u32,
    /// Symbol the diagnostic must mention; empty for any symbol.
    #[serde(default)]
    pub symbol_name: String,
    /// Set once the rule has matched a diagnostic.
    #[serde(default)]
    pub matched: bool,
}

impl Suppression {
    /// Creates a rule constrained only by error id.
    #[must_use]
    pub fn new(error_id: impl Into<String>) -> Self {
        Self {
            error_id: error_id.into(),
            ..Self::default()
        }
    }

    /// Constrains the rule to a file.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Constrains the rule to a line.
    #[must_use]
    pub fn with_line_number(mut self, line_number: u32) -> Self {
        self.line_number = line_number;
        self
    }

    /// Constrains the rule to a symbol.
    #[must_use]
    pub fn with_symbol_name(mut self, symbol_name: impl Into<String>) -> Self {
        self.symbol_name = symbol_name.into();
        self
    }

    /// Checks the error id.
    ///
    /// # Errors
    ///
    /// Returns [`SuppressionError::MissingId`] for an empty id and
    /// [`SuppressionError::InvalidId`] for anything that is neither `*` nor
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn validate(&self) -> Result<(), SuppressionError> {
        validate_error_id(&self.error_id)
    }

    /// Tests the rule against a diagnostic and records a match.
    pub fn is_match(&mut self, diagnostic: &Diagnostic) -> bool {
        if self.matches(diagnostic, FileNameMatching::Literal) {
            self.matched = true;
            return true;
        }
        false
    }

    /// Tests the rule against a diagnostic without recording anything.
    #[must_use]
    pub fn matches(&self, diagnostic: &Diagnostic, file_matching: FileNameMatching) -> bool {
        if !self.error_id.is_empty()
            && self.error_id != ANY_ERROR_ID
            && self.error_id != diagnostic.error_id
        {
            return false;
        }
        if !self.file_name.is_empty() {
            let file_matches = match file_matching {
                FileNameMatching::Literal => self.file_name == diagnostic.file_name,
                FileNameMatching::Glob => glob::matches(&self.file_name, &diagnostic.file_name),
            };
            if !file_matches {
                return false;
            }
        }
        if self.line_number > 0 && self.line_number != diagnostic.line_number {
            return false;
        }
        // Tokens are newline-terminated, so `foo\n` never hits `foobar\n`
        if !self.symbol_name.is_empty()
            && !contains_symbol(&diagnostic.symbol_names, &self.symbol_name)
        {
            return false;
        }
        true
    }

    /// Returns true if the rule names a file.
    #[must_use]
    pub fn has_file(&self) -> bool {
        !self.file_name.is_empty()
    }
}

/// Renders the line format `errorId[:fileName[:lineNumber]]`.
impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_id)?;
        if self.has_file() || self.line_number > 0 {
            write!(f, ":{}", self.file_name)?;
        }
        if self.line_number > 0 {
            write!(f, ":{}", self.line_number)?;
        }
        Ok(())
    }
}

/// Validates a suppression error id.
///
/// # Errors
///
/// See [`Suppression::validate`].
pub fn validate_error_id(id: &str) -> Result<(), SuppressionError> {
    if id.is_empty() {
        return Err(SuppressionError::MissingId);
    }
    if id == ANY_ERROR_ID {
        return Ok(());
    }
    let valid = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !id.starts_with(|c: char| c.is_ascii_digit());
    if !valid {
        return Err(SuppressionError::InvalidId { id: id.to_string() });
    }
    Ok(())
}

fn contains_symbol(symbol_names: &str, symbol: &str) -> bool {
    let mut needle = String::with_capacity(symbol.len() + 1);
    needle.push_str(symbol);
    needle.push('\n');
    symbol_names.contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_identifiers() {
        for id in ["uninitvar", "_x", "a1", "NULL_pointer_2", "*"] {
            assert!(validate_error_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects() {
        assert!(matches!(
            validate_error_id(""),
            Err(SuppressionError::MissingId)
        ));
        for id in ["1abc", "foo-bar", "a.b", "a b", "**", "caf\u{e9}"] {
            let err = validate_error_id(id).unwrap_err();
            assert!(err.to_string().contains(id), "message should name {id}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            validate_error_id("").unwrap_err().to_string(),
            "Failed to add suppression. No id."
        );
        assert_eq!(
            validate_error_id("9x").unwrap_err().to_string(),
            "Failed to add suppression. Invalid id \"9x\""
        );
    }

    #[test]
    fn test_unconstrained_rule_matches_everything() {
        let rule = Suppression::new("*");
        assert!(rule.matches(&Diagnostic::new("a", "x.c", 1), FileNameMatching::Literal));
        assert!(rule.matches(&Diagnostic::new("b", "", 0), FileNameMatching::Literal));
        assert!(Suppression::default()
            .matches(&Diagnostic::new("c", "y.c", 9), FileNameMatching::Literal));
    }

    #[test]
    fn test_fields_are_and_combined() {
        let rule = Suppression::new("nullPointer")
            .with_file_name("a.c")
            .with_line_number(5);
        let lit = FileNameMatching::Literal;
        assert!(rule.matches(&Diagnostic::new("nullPointer", "a.c", 5), lit));
        assert!(!rule.matches(&Diagnostic::new("nullPointer", "a.c", 6), lit));
        assert!(!rule.matches(&Diagnostic::new("nullPointer", "b.c", 5), lit));
        assert!(!rule.matches(&Diagnostic::new("uninitvar", "a.c", 5), lit));
    }

    #[test]
    fn test_symbol_matches_whole_tokens() {
        let rule = Suppression::new("unusedVariable").with_symbol_name("foo");
        let lit = FileNameMatching::Literal;
        let with_foo = Diagnostic::new("unusedVariable", "a.c", 1)
            .with_symbol("foo")
            .with_symbol("bar");
        let with_foobar = Diagnostic::new("unusedVariable", "a.c", 1).with_symbol("foobar");
        assert_eq!(with_foo.symbol_names, "foo\nbar\n");
        assert!(rule.matches(&with_foo, lit));
        assert!(!rule.matches(&with_foobar, lit));
        assert!(!rule.matches(&Diagnostic::new("unusedVariable", "a.c", 1), lit));
    }

    #[test]
    fn test_file_name_literal_vs_glob() {
        let rule = Suppression::new("*").with_file_name("src/*.c");
        let diagnostic = Diagnostic::new("x", "src/a.c", 1);
        assert!(!rule.matches(&diagnostic, FileNameMatching::Literal));
        assert!(rule.matches(&diagnostic, FileNameMatching::Glob));
    }

    #[test]
    fn test_is_match_sets_matched() {
        let mut rule = Suppression::new("nullPointer");
        assert!(!rule.is_match(&Diagnostic::new("uninitvar", "a.c", 5)));
        assert!(!rule.matched);
        assert!(rule.is_match(&Diagnostic::new("nullPointer", "a.c", 5)));
        assert!(rule.matched);
    }

    #[test]
    fn test_display_line_format() {
        assert_eq!(Suppression::new("uninitvar").to_string(), "uninitvar");
        assert_eq!(
            Suppression::new("uninitvar").with_file_name("foo.c").to_string(),
            "uninitvar:foo.c"
        );
        assert_eq!(
            Suppression::new("uninitvar")
                .with_file_name("foo.c")
                .with_line_number(10)
                .to_string(),
            "uninitvar:foo.c:10"
        );
        assert_eq!(
            Suppression::new("uninitvar").with_line_number(3).to_string(),
            "uninitvar::3"
        );
    }
}
