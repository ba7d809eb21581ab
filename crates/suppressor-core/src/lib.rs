//! # suppressor-core
//!
//! Suppression rules for static analysis diagnostics.
//!
//! This crate turns suppression sources into rules and decides, one
//! diagnostic at a time, whether a finding should be hidden. It includes:
//!
//! - [`Suppressions`] for holding rules and matching diagnostics
//! - line-format and XML parsers for suppression sources
//! - [`SuppressionFilter`] for loading sources and filtering a whole run
//! - unmatched-rule reporting for suppressions that never fired
//!
//! ## Example
//!
//! ```
//! use suppressor_core::{Diagnostic, Suppressions};
//!
//! let mut suppressions = Suppressions::new();
//! suppressions.parse_str("// legacy code\nuninitvar:src/old.c\n")?;
//!
//! let diagnostic = Diagnostic::new("uninitvar", "src/old.c", 12);
//! assert!(suppressions.is_suppressed(&diagnostic));
//! assert!(suppressions.unmatched_global_suppressions(false).is_empty());
//! # Ok::<(), suppressor_core::SuppressionError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod report;
mod suppression;
mod suppressions;

/// Line-based suppression format.
pub mod line_format;
/// Utility modules shared by the parsers and matchers.
pub mod utils;
/// XML suppression format.
pub mod xml_format;

pub use config::{Config, ConfigError, ReportConfig, SuppressionsConfig};
pub use error::SuppressionError;
pub use filter::{FilterError, SuppressionFilter, SuppressionFilterBuilder};
pub use report::{FilterReport, UNMATCHED_SUPPRESSION_ID};
pub use suppression::{
    validate_error_id, Diagnostic, FileNameMatching, Suppression, ANY_ERROR_ID,
    UNUSED_FUNCTION_ID,
};
pub use suppressions::{SuppressionScope, Suppressions};
