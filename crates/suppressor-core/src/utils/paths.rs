//! Path utilities for suppression file names.

/// Converts native path separators to the canonical `/` form.
///
/// Diagnostics arrive with normalized paths, so rule file names are passed
/// through this before they are compared.
///
/// # Example
///
/// ```
/// use suppressor_core::utils::paths::from_native_separators;
///
/// assert_eq!(from_native_separators(r"src\lib\a.c"), "src/lib/a.c");
/// ```
#[must_use]
pub fn from_native_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns true if the path contains glob wildcard characters.
#[must_use]
pub fn has_wildcards(path: &str) -> bool {
    path.contains(['*', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_native_separators() {
        assert_eq!(from_native_separators(r"C:\src\a.c"), "C:/src/a.c");
        assert_eq!(from_native_separators("src/a.c"), "src/a.c");
        assert_eq!(from_native_separators(""), "");
    }

    #[test]
    fn test_has_wildcards() {
        assert!(has_wildcards("src/*.c"));
        assert!(has_wildcards("a?.c"));
        assert!(!has_wildcards("src/a.c"));
    }
}
