//! Error types for suppression parsing and loading.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning suppression sources into rules.
///
/// The `Display` text is the user-facing message. Drivers print it as-is.
#[derive(Debug, Error, Diagnostic)]
pub enum SuppressionError {
    /// The rule has an empty error id.
    #[error("Failed to add suppression. No id.")]
    #[diagnostic(
        code(suppressor::missing_id),
        help("start the rule with an error id, or `*` for any id")
    )]
    MissingId,

    /// The error id is neither `*` nor an identifier.
    #[error("Failed to add suppression. Invalid id \"{id}\"")]
    #[diagnostic(
        code(suppressor::invalid_id),
        help("ids use ASCII letters, digits and `_`, and do not start with a digit")
    )]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// An XML suppression document could not be opened.
    #[error("File not found")]
    #[diagnostic(code(suppressor::file_not_found))]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// An XML suppression document is malformed.
    #[error("Failed to parse suppressions XML: {message}")]
    #[diagnostic(code(suppressor::xml))]
    Xml {
        /// Parser message.
        message: String,
    },

    /// Reading a line-format source failed.
    #[error("Failed to read suppressions: {0}")]
    #[diagnostic(code(suppressor::io))]
    Io(#[from] std::io::Error),
}
