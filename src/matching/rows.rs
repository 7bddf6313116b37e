use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::core::row::MatchedRow;
use crate::core::types::TargetTriple;
use crate::parsing::workbook::Workbook;
use crate::utils::text::{flatten_row, CELL_SEPARATOR};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("No rows found for {0}")]
    NoMatch(TargetTriple),

    #[error("Invalid target label: {0:?}")]
    InvalidLabel(String),

    #[error("Failed to build label pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Finds rows that mention every label of a target triple.
///
/// Labels are matched case-insensitively as whole words, anywhere in the row and in
/// any order. Whitespace inside a label matches any run of whitespace, so a cell
/// reading `Grade\n8` still counts as `Grade 8`.
#[derive(Debug)]
pub struct RowMatcher {
    target: TargetTriple,
    patterns: Vec<Regex>,
}

impl RowMatcher {
    /// # Errors
    ///
    /// Returns `MatchError::InvalidLabel` if any label is blank.
    pub fn new(target: &TargetTriple) -> Result<Self, MatchError> {
        let patterns = target
            .labels()
            .iter()
            .map(|label| label_pattern(label))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            target: target.clone(),
            patterns,
        })
    }

    #[must_use]
    pub fn target(&self) -> &TargetTriple {
        &self.target
    }

    /// Check whether a flattened row mentions all three labels
    #[must_use]
    pub fn is_match(&self, row_text: &str) -> bool {
        self.patterns.iter().all(|p| p.is_match(row_text))
    }

    /// Scan every sheet, in order, and collect qualifying rows.
    ///
    /// Rows whose normalized text is identical to an earlier match (in any sheet)
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NoMatch` if no row in any sheet qualifies.
    pub fn extract(&self, workbook: &Workbook) -> Result<Vec<MatchedRow>, MatchError> {
        let mut results = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut hits = 0usize;

        for sheet in &workbook.sheets {
            let rows = &sheet.grid.rows;
            for (row_idx, cells) in rows.iter().enumerate() {
                if !self.is_match(&cells.join(CELL_SEPARATOR)) {
                    continue;
                }
                hits += 1;

                let context_row = flatten_row(cells);
                if !seen.insert(context_row.clone()) {
                    continue;
                }

                let context_above = row_idx
                    .checked_sub(1)
                    .map(|prev| flatten_row(&rows[prev]))
                    .unwrap_or_default();

                results.push(MatchedRow::new(
                    &sheet.name,
                    row_idx,
                    context_above,
                    context_row,
                ));
            }
        }

        if results.is_empty() {
            return Err(MatchError::NoMatch(self.target.clone()));
        }

        debug!(
            target_triple = %self.target,
            hits,
            unique = results.len(),
            "Extracted matching rows"
        );

        Ok(results)
    }
}

/// Convenience wrapper: build a matcher for `target` and scan `workbook`
///
/// # Errors
///
/// See [`RowMatcher::new`] and [`RowMatcher::extract`].
pub fn extract_rows(
    workbook: &Workbook,
    target: &TargetTriple,
) -> Result<Vec<MatchedRow>, MatchError> {
    RowMatcher::new(target)?.extract(workbook)
}

/// Case-insensitive whole-word pattern for a label
fn label_pattern(label: &str) -> Result<Regex, MatchError> {
    let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return Err(MatchError::InvalidLabel(label.to_string()));
    }

    let trimmed = label.trim();
    let starts_word = trimmed.starts_with(is_word_char);
    let ends_word = trimmed.ends_with(is_word_char);

    let pattern = format!(
        r"(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        words.join(r"\s+"),
        if ends_word { r"\b" } else { "" },
    );

    Ok(Regex::new(&pattern)?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::workbook::{Grid, Sheet};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    fn sheet(name: &str, rows: Vec<Vec<String>>) -> Sheet {
        Sheet::new(name, Grid::new(row(&["A", "B", "C"]), rows))
    }

    fn target() -> TargetTriple {
        TargetTriple::default()
    }

    #[test]
    fn test_labels_must_all_appear_as_whole_words() {
        let matcher = RowMatcher::new(&target()).unwrap();
        assert!(matcher.is_match("grade 8 | UNIT 1 | module 2"));
        assert!(matcher.is_match("Module 2 | Unit 1, Grade 8"));
        assert!(!matcher.is_match("Grade 8 | Unit 1"));
        // Unit 10 is not Unit 1, Module 22 is not Module 2
        assert!(!matcher.is_match("Grade 8 | Unit 10 | Module 2"));
        assert!(!matcher.is_match("Grade 8 | Unit 1 | Module 22"));
        assert!(!matcher.is_match("Grade 80 | Unit 1 | Module 2"));
    }

    #[test]
    fn test_label_whitespace_is_flexible() {
        let matcher = RowMatcher::new(&target()).unwrap();
        assert!(matcher.is_match("Grade\n8 | Unit  1 | Module\t2"));
    }

    #[test]
    fn test_blank_label_rejected() {
        let result = RowMatcher::new(&TargetTriple::new("Grade 8", "  ", "Module 2"));
        assert!(matches!(result, Err(MatchError::InvalidLabel(_))));
    }

    #[test]
    fn test_extract_single_row_first_in_sheet() {
        let workbook = Workbook::new(vec![sheet(
            "Scope",
            vec![row(&["Grade 8 Unit 1 Module 2 CCSS.L.8.6 figurative language", "", ""])],
        )]);

        let rows = extract_rows(&workbook, &target()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_sheet, "Scope");
        assert_eq!(rows[0].row_index, 0);
        assert_eq!(rows[0].context_above, "");
        assert_eq!(
            rows[0].context_row,
            "Grade 8 Unit 1 Module 2 CCSS.L.8.6 figurative language | |"
        );
    }

    #[test]
    fn test_context_above_is_previous_row() {
        let workbook = Workbook::new(vec![sheet(
            "Scope",
            vec![
                row(&["Week 3", "Reading  focus", ""]),
                row(&["Grade 8", "Unit 1", "Module 2"]),
            ],
        )]);

        let rows = extract_rows(&workbook, &target()).unwrap();
        assert_eq!(rows[0].row_index, 1);
        assert_eq!(rows[0].context_above, "Week 3 | Reading focus |");
        assert_eq!(rows[0].context_row, "Grade 8 | Unit 1 | Module 2");
    }

    #[test]
    fn test_duplicate_rows_collapse_across_sheets() {
        let workbook = Workbook::new(vec![
            sheet("First", vec![row(&["Grade 8", "Unit 1", "Module 2"])]),
            sheet(
                "Second",
                vec![
                    row(&["Grade 8 ", " Unit 1", "Module   2"]),
                    row(&["Grade 8", "Unit 1", "Module 2 RL.8.1"]),
                ],
            ),
        ]);

        let rows = extract_rows(&workbook, &target()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_sheet, "First");
        assert_eq!(rows[1].source_sheet, "Second");
        assert_eq!(rows[1].row_index, 1);
    }

    #[test]
    fn test_context_is_truncated() {
        let long = format!("Grade 8 Unit 1 Module 2 {}", "word ".repeat(200));
        let workbook = Workbook::new(vec![sheet("Scope", vec![row(&[long.as_str(), "", ""])])]);

        let rows = extract_rows(&workbook, &target()).unwrap();
        assert_eq!(rows[0].context_row.chars().count(), 400);
    }

    #[test]
    fn test_no_match_is_an_error() {
        let workbook = Workbook::new(vec![sheet(
            "Scope",
            vec![row(&["Grade 7", "Unit 1", "Module 2"])],
        )]);

        match extract_rows(&workbook, &target()) {
            Err(MatchError::NoMatch(t)) => assert_eq!(t, target()),
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }
}
