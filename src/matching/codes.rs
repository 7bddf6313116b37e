use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::{StandardCode, CODE_NAMESPACE};

/// Optional namespace prefix, a 1-3 letter subject, a 1-2 digit grade, a standard
/// number and an optional sub-part letter, all dot separated.
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)(?:{}\.)?([A-Z]{{1,3}}\.[0-9]{{1,2}}\.[0-9]+[A-Z]?)",
        regex::escape(CODE_NAMESPACE)
    );
    Regex::new(&pattern).expect("valid standard code regex")
});

/// Extract every standard code mentioned in `text`, in order of appearance.
///
/// Matches do not overlap. Repeated mentions of the same code are all returned;
/// callers that need distinct codes deduplicate downstream.
///
/// ```
/// use standards_align::matching::codes::extract_codes;
///
/// let codes = extract_codes("Lesson 3 | ccss.rl.8.1, RI.8.2 and W.8.3a");
/// let codes: Vec<_> = codes.iter().map(|c| c.as_str()).collect();
/// assert_eq!(codes, ["CCSS.RL.8.1", "CCSS.RI.8.2", "CCSS.W.8.3A"]);
/// ```
#[must_use]
pub fn extract_codes(text: &str) -> Vec<StandardCode> {
    CODE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| StandardCode::new(m.as_str()))
        .collect()
}

/// First standard code found in `text`, if any
#[must_use]
pub fn first_code(text: &str) -> Option<StandardCode> {
    CODE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| StandardCode::new(m.as_str()))
}

/// Canonical code for a description-table cell.
///
/// Uses the first recognizable code in the cell so that spellings like
/// `CCSS.ELA-LITERACY.L.8.6` line up with codes extracted from row text; cells with
/// no recognizable pattern are normalized as-is.
#[must_use]
pub fn code_from_cell(cell: &str) -> StandardCode {
    first_code(cell).unwrap_or_else(|| StandardCode::new(cell))
}
