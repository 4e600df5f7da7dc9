//! Helpers for `Key=Value` statement lines.
//!
//! Keys are matched as a prefix of the line after leading whitespace and
//! are compared ASCII case-insensitively. Keys passed in include the `=`.

/// Returns true when `line` is a statement for `key`.
pub fn key_matches(line: &str, key: &str) -> bool {
    split_key(line, key).is_some()
}

/// The text after `key` on a statement line, untrimmed.
pub fn value_of<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    split_key(line, key).map(|(_, rest)| rest)
}

/// Rebuild a statement line with a new value.
///
/// The line's indentation, the key's original spelling, the whitespace
/// between `=` and the value, and any trailing whitespace are all kept;
/// only the value text itself is replaced. Returns `None` when the line is
/// not a statement for `key`.
pub fn with_value(line: &str, key: &str, value: &str) -> Option<String> {
    let (head, rest) = split_key(line, key)?;
    let trimmed_start = rest.trim_start();
    let lead = &rest[..rest.len() - trimmed_start.len()];
    let trail = &trimmed_start[trimmed_start.trim_end().len()..];
    Some(format!("{head}{lead}{value}{trail}"))
}

/// Split a statement line into `(indent + key, rest)`.
fn split_key<'a>(line: &'a str, key: &str) -> Option<(&'a str, &'a str)> {
    let indent = line.len() - line.trim_start().len();
    let key_end = indent + key.len();
    let candidate = line.get(indent..key_end)?;
    if candidate.eq_ignore_ascii_case(key) {
        Some((&line[..key_end], &line[key_end..]))
    } else {
        None
    }
}
