//! Utility functions for parsers and matchers.

pub mod glob;
pub mod numbers;
pub mod paths;

// Re-export commonly used utilities
#[doc(inline)]
pub use glob::matches as glob_matches;
#[doc(inline)]
pub use paths::from_native_separators;
