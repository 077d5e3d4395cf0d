//! Naive path splitting. Paths are relative to the file system's top level,
//! with no leading separator and no `.`/`..` handling.

/// Splits `path` into its segments. Trailing separators are ignored. Empty
/// input, a path of separators only, or an empty segment left by a leading
/// or doubled separator yields `None`.
pub fn segments(path: &str, separator: char) -> Option<Vec<&str>> {
    let mut segments: Vec<&str> = path.split(separator).collect();
    while segments.last().is_some_and(|segment| segment.is_empty()) {
        segments.pop();
    }
    if segments.is_empty() || segments.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some(segments)
}
