//! The line-based suppression format.
//!
//! One rule per line:
//! ```text
//! // comment
//! uninitvar
//! nullPointer:src/main.c
//! memleak:src/alloc.c:42
//! ```
//!
//! `\n`, `\r\n` and a lone `\r` all end a line. Empty lines and lines whose
//! first two characters are `//` are skipped.

use crate::suppression::Suppression;
use crate::utils::numbers::parse_leading_int;
use crate::utils::paths::from_native_separators;

/// Iterates over the lines of `content` that hold rules.
pub fn rule_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
}

/// Translates one `errorId[:fileName[:lineNumber]]` line into a rule.
///
/// The id is not validated here. A colon in the file part only separates a
/// line number when no `.` follows it and the text after it starts with a
/// positive integer, so `C:path.c` and `src/a.c:x` stay whole file names.
#[must_use]
pub fn parse_line(line: &str) -> Suppression {
    let Some((error_id, rest)) = line.split_once(':') else {
        return Suppression::new(line);
    };

    let mut file_name = rest;
    let mut line_number = 0;

    if let Some(pos) = rest.rfind(':') {
        let tail = &rest[pos + 1..];
        if !tail.contains('.') {
            if let Some(n) = parse_leading_int(tail).and_then(|n| u32::try_from(n).ok()) {
                if n > 0 {
                    line_number = n;
                    file_name = &rest[..pos];
                }
            }
        }
    }

    Suppression::new(error_id)
        .with_file_name(from_native_separators(file_name))
        .with_line_number(line_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_only() {
        let rule = parse_line("uninitvar");
        assert_eq!(rule, Suppression::new("uninitvar"));
    }

    #[test]
    fn test_id_file_line() {
        let rule = parse_line("uninitvar:foo.c:10");
        assert_eq!(rule.error_id, "uninitvar");
        assert_eq!(rule.file_name, "foo.c");
        assert_eq!(rule.line_number, 10);
    }

    #[test]
    fn test_id_file() {
        let rule = parse_line("uninitvar:foo.c");
        assert_eq!(rule.file_name, "foo.c");
        assert_eq!(rule.line_number, 0);
    }

    #[test]
    fn test_drive_letter_stays_in_file_name() {
        let rule = parse_line("uninitvar:C:path.c");
        assert_eq!(rule.file_name, "C:path.c");
        assert_eq!(rule.line_number, 0);

        let rule = parse_line(r"uninitvar:C:\src\a.c:7");
        assert_eq!(rule.file_name, "C:/src/a.c");
        assert_eq!(rule.line_number, 7);
    }

    #[test]
    fn test_dot_after_last_colon_keeps_file_name() {
        let rule = parse_line("uninitvar:dir:1.c");
        assert_eq!(rule.file_name, "dir:1.c");
        assert_eq!(rule.line_number, 0);
    }

    #[test]
    fn test_non_positive_or_missing_line_keeps_file_name() {
        assert_eq!(parse_line("id:a.c:0").file_name, "a.c:0");
        assert_eq!(parse_line("id:a.c:-4").file_name, "a.c:-4");
        assert_eq!(parse_line("id:a.c:x").file_name, "a.c:x");
        assert_eq!(parse_line("id:a.c:").file_name, "a.c:");
    }

    #[test]
    fn test_trailing_garbage_after_line_number() {
        let rule = parse_line("id:a.c:12abc");
        assert_eq!(rule.file_name, "a.c");
        assert_eq!(rule.line_number, 12);
    }

    #[test]
    fn test_empty_id_and_file() {
        let rule = parse_line(":a.c");
        assert_eq!(rule.error_id, "");
        assert_eq!(rule.file_name, "a.c");

        let rule = parse_line("id::5");
        assert_eq!(rule.file_name, "");
        assert_eq!(rule.line_number, 5);
    }

    #[test]
    fn test_rule_lines_skips_blank_and_comments() {
        let content = "// header\r\nuninitvar\r\rnullPointer:a.c\n\n//x\nmemleak";
        let lines: Vec<&str> = rule_lines(content).collect();
        assert_eq!(lines, vec!["uninitvar", "nullPointer:a.c", "memleak"]);
    }

    #[test]
    fn test_rule_lines_keeps_indented_comment() {
        let lines: Vec<&str> = rule_lines("  // not a comment").collect();
        assert_eq!(lines, vec!["  // not a comment"]);
    }
}
