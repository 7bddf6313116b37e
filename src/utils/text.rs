//! Centralized text normalization helpers and input limits.

/// Maximum number of data rows accepted from a single sheet
pub const MAX_SHEET_ROWS: usize = 1_000_000;

/// Maximum length, in characters, of a matched row's context snippets
pub const MAX_CONTEXT_CHARS: usize = 400;

/// Maximum length, in characters, of `context_row` on a joined record
pub const JOINED_CONTEXT_CHARS: usize = 300;

/// Separator placed between cell values when a row is flattened to text
pub const CELL_SEPARATOR: &str = " | ";

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// # Examples
///
/// ```
/// use standards_align::utils::text::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Grade 8 |\n\n Unit\t1  "), "Grade 8 | Unit 1");
/// ```
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Flatten a row's cells into one normalized, length-capped snippet.
#[must_use]
pub fn flatten_row(cells: &[String]) -> String {
    let joined = cells.join(CELL_SEPARATOR);
    truncate_chars(&collapse_whitespace(&joined), MAX_CONTEXT_CHARS).to_string()
}

/// Lowercased, trimmed form of a column header used for name matching
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_SHEET_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_SHEET_ROWS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        // "é" is two bytes; slicing by bytes would panic
        assert_eq!(truncate_chars("ééé", 2), "éé");
    }

    #[test]
    fn test_flatten_row_joins_collapses_and_truncates() {
        let cells = vec!["Grade 8".to_string(), String::new(), "Unit  1".to_string()];
        assert_eq!(flatten_row(&cells), "Grade 8 | | Unit 1");

        let long = vec!["x".repeat(500)];
        assert_eq!(flatten_row(&long).chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  CCSS Code "), "ccss code");
    }

    #[test]
    fn test_check_row_limit() {
        assert!(check_row_limit(0).is_none());
        assert!(check_row_limit(MAX_SHEET_ROWS - 1).is_none());
        assert!(check_row_limit(MAX_SHEET_ROWS).is_some());
    }
}
