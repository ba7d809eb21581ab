//! Wildcard matching for file-name-like strings.
//!
//! Supported syntax:
//! - `*` matches zero or more characters
//! - `?` matches exactly one character
//!
//! Every other character matches itself. There are no character classes and
//! no escaping.

/// Checks whether `name` matches the wildcard `pattern`.
///
/// The matcher scans forward and keeps an explicit stack of retry points
/// instead of recursing. On `*` it jumps straight to the next position in
/// `name` holding the literal that follows the star, saving that position so
/// a later mismatch can resume one character further on.
///
/// # Examples
///
/// ```
/// use suppressor_core::utils::glob::matches;
///
/// assert!(matches("*.cpp", "foo.cpp"));
/// assert!(!matches("*.cpp", "foo.cpp.bak"));
/// assert!(matches("a?c", "abc"));
/// ```
#[must_use]
pub fn matches(pattern: &str, name: &str) -> bool {
    let pattern = collapse_stars(pattern);
    let name: Vec<char> = name.chars().collect();

    let mut p = 0;
    let mut n = 0;
    let mut backtrack: Vec<(usize, usize)> = Vec::new();

    loop {
        let mut matching = true;
        while p < pattern.len() && matching {
            match pattern[p] {
                '*' => match pattern.get(p + 1) {
                    // Trailing star swallows the rest of the name
                    None => n = name.len(),
                    // Any character can follow, so every position is a candidate
                    Some('?') => {
                        if n < name.len() {
                            backtrack.push((p, n));
                        }
                    }
                    Some(&anchor) => {
                        while n < name.len() && name[n] != anchor {
                            n += 1;
                        }
                        if n < name.len() {
                            backtrack.push((p, n));
                        }
                    }
                },
                '?' => {
                    if n < name.len() {
                        n += 1;
                    } else {
                        matching = false;
                    }
                }
                literal => {
                    if name.get(n) == Some(&literal) {
                        n += 1;
                    } else {
                        matching = false;
                    }
                }
            }
            p += 1;
        }

        if matching && n == name.len() {
            return true;
        }

        let Some((saved_p, saved_n)) = backtrack.pop() else {
            return false;
        };
        p = saved_p;
        n = saved_n + 1;
    }
}

/// Collapses runs of `*` so the character after a star is never another star.
fn collapse_stars(pattern: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.last() == Some(&'*') {
            continue;
        }
        out.push(c);
    }
    out
}
