//! Lenient integer parsing for suppression sources.

/// Parses the integer at the start of `text`.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits is read. Anything after the digits is ignored, so `"10abc"`
/// yields `10`.
///
/// Returns `None` when no digits follow, or when the value does not fit an
/// `i32`.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}

/// Parses a line number, mapping failures and non-positive values to `0`
/// ("any line").
#[must_use]
pub fn parse_line_number(text: &str) -> u32 {
    parse_leading_int(text)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
