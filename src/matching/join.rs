use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::store::DescriptionIndex;
use crate::core::record::JoinedRecord;
use crate::core::row::MatchedRow;
use crate::core::types::StandardCode;
use crate::matching::codes::extract_codes;
use crate::utils::text::{truncate_chars, JOINED_CONTEXT_CHARS};

/// Result of joining matched rows with the description index
#[derive(Debug, Clone, Default, Serialize)]
pub struct JoinedTable {
    pub records: Vec<JoinedRecord>,

    /// True when no row yielded a code and every record is an uncoded placeholder
    pub fallback: bool,
}

/// A distinct code offered to the downstream scoring stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate<'a> {
    pub code: &'a StandardCode,
    pub description: &'a str,
}

impl JoinedTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JoinedRecord> {
        self.records.iter()
    }

    /// All records carrying `code`, in table order
    #[must_use]
    pub fn records_for(&self, code: &StandardCode) -> Vec<&JoinedRecord> {
        self.records
            .iter()
            .filter(|r| r.code.as_ref() == Some(code))
            .collect()
    }

    /// Distinct codes with their descriptions, in first-seen order
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        let mut seen: HashSet<&StandardCode> = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.code.as_ref().map(|code| (code, r.description.as_str())))
            .filter(|(code, _)| seen.insert(*code))
            .map(|(code, description)| Candidate { code, description })
            .collect()
    }

    /// Candidates rendered one per line as `CODE: description`
    #[must_use]
    pub fn candidate_lines(&self) -> String {
        self.candidates()
            .iter()
            .map(|c| format!("{}: {}", c.code, c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a JoinedTable {
    type Item = &'a JoinedRecord;
    type IntoIter = std::slice::Iter<'a, JoinedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Join matched rows with code descriptions.
///
/// Each row's text is scanned for codes and one record is emitted per
/// `(row, code)` pair, described from `index` (or the no-description sentinel).
/// Records are then deduplicated on `(code, sheet)`, first occurrence wins.
///
/// If no row yields any code at all, rows are emitted with no code instead and
/// the same dedup keeps the first uncoded row per sheet. Uncoded records keep
/// the full `context_row`. The fallback is all-or-nothing: a single coded row
/// anywhere disables it.
#[must_use]
pub fn join(rows: &[MatchedRow], index: &DescriptionIndex) -> JoinedTable {
    let pairs: Vec<(&MatchedRow, StandardCode)> = rows
        .iter()
        .flat_map(|row| {
            extract_codes(&row.context_row)
                .into_iter()
                .map(move |code| (row, code))
        })
        .collect();

    if pairs.is_empty() {
        warn!(
            rows = rows.len(),
            "No standard codes found in any matched row; emitting uncoded records"
        );
        let mut seen: HashSet<(Option<StandardCode>, &str)> = HashSet::new();
        let records = rows
            .iter()
            .filter(|row| seen.insert((None, row.source_sheet.as_str())))
            .map(|row| JoinedRecord::uncoded(&row.source_sheet, row.context_row.clone()))
            .collect();
        return JoinedTable {
            records,
            fallback: true,
        };
    }

    let emitted = pairs.len();
    let mut seen: HashSet<(Option<StandardCode>, &str)> = HashSet::new();
    let mut records = Vec::new();

    for (row, code) in pairs {
        if !seen.insert((Some(code.clone()), row.source_sheet.as_str())) {
            continue;
        }
        let description = index.describe(&code).to_string();
        records.push(JoinedRecord::new(
            &row.source_sheet,
            joined_context(row),
            code,
            description,
        ));
    }

    let missing = records.iter().filter(|r| !r.has_description()).count();
    debug!(
        emitted,
        kept = records.len(),
        missing_descriptions = missing,
        "Joined codes with descriptions"
    );

    JoinedTable {
        records,
        fallback: false,
    }
}

fn joined_context(row: &MatchedRow) -> &str {
    truncate_chars(&row.context_row, JOINED_CONTEXT_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::DescriptionEntry;
    use crate::core::types::NO_DESCRIPTION;

    fn index() -> DescriptionIndex {
        DescriptionIndex::from_entries([
            DescriptionEntry::new(StandardCode::new("L.8.6"), "Interpret figures of speech"),
            DescriptionEntry::new(StandardCode::new("RL.8.1"), "Cite textual evidence"),
        ])
    }

    fn matched(sheet: &str, idx: usize, text: &str) -> MatchedRow {
        MatchedRow::new(sheet, idx, "", text)
    }

    #[test]
    fn test_join_single_code_with_description() {
        let text = "Grade 8 Unit 1 Module 2 CCSS.L.8.6 figurative language";
        let table = join(&[matched("Scope", 0, text)], &index());

        assert!(!table.fallback);
        assert_eq!(table.len(), 1);
        let record = &table.records[0];
        assert_eq!(record.sheet, "Scope");
        assert_eq!(record.context_row, text);
        assert_eq!(record.code, Some(StandardCode::new("CCSS.L.8.6")));
        assert_eq!(record.description, "Interpret figures of speech");
    }

    #[test]
    fn test_unknown_code_gets_sentinel() {
        let table = join(&[matched("Scope", 0, "Module 2 W.8.1")], &index());
        assert_eq!(table.records[0].description, NO_DESCRIPTION);
    }

    #[test]
    fn test_dedup_by_code_and_sheet() {
        let rows = vec![
            matched("Scope", 0, "L.8.6 and RL.8.1"),
            matched("Scope", 1, "again l.8.6"),
            matched("Pacing", 0, "CCSS.L.8.6"),
        ];
        let table = join(&rows, &index());

        let keys: Vec<(&str, &str)> = table
            .iter()
            .map(|r| (r.sheet.as_str(), r.code.as_ref().unwrap().as_str()))
            .collect();
        assert_eq!(
            keys,
            [
                ("Scope", "CCSS.L.8.6"),
                ("Scope", "CCSS.RL.8.1"),
                ("Pacing", "CCSS.L.8.6"),
            ]
        );
        // First occurrence keeps its own context
        assert_eq!(table.records[0].context_row, "L.8.6 and RL.8.1");
    }

    #[test]
    fn test_fallback_when_no_codes_anywhere() {
        let rows = vec![
            matched("Scope", 0, "Grade 8 | Unit 1 | Module 2 | Argument"),
            matched("Scope", 3, "Grade 8 | Unit 1 | Module 2 | Narrative"),
        ];
        let table = join(&rows, &index());

        assert!(table.fallback);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].code, None);
        assert_eq!(table.records[0].description, NO_DESCRIPTION);
        assert_eq!(
            table.records[0].context_row,
            "Grade 8 | Unit 1 | Module 2 | Argument"
        );
    }

    #[test]
    fn test_fallback_keeps_one_uncoded_record_per_sheet() {
        let rows = vec![
            matched("Scope", 0, "Module 2 Argument"),
            matched("Scope", 4, "Module 2 Narrative"),
            matched("Pacing", 1, "Module 2 Research"),
        ];
        let table = join(&rows, &index());

        let keys: Vec<(Option<&StandardCode>, &str)> = table
            .iter()
            .map(|r| (r.code.as_ref(), r.sheet.as_str()))
            .collect();
        assert_eq!(keys, [(None, "Scope"), (None, "Pacing")]);
        assert_eq!(table.records[0].context_row, "Module 2 Argument");
    }

    #[test]
    fn test_fallback_context_is_not_capped() {
        let text = format!("Module 2 {}", "x".repeat(385));
        let table = join(&[matched("Scope", 0, &text)], &index());

        assert!(table.fallback);
        assert_eq!(table.records[0].context_row, text);
        assert_eq!(table.records[0].context_row.chars().count(), 394);
    }

    #[test]
    fn test_fallback_is_global_not_per_row() {
        let rows = vec![
            matched("Scope", 0, "no codes here"),
            matched("Scope", 1, "RL.8.1"),
        ];
        let table = join(&rows, &index());

        assert!(!table.fallback);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].code, Some(StandardCode::new("RL.8.1")));
    }

    #[test]
    fn test_joined_context_is_capped() {
        let text = format!("RL.8.1 {}", "x".repeat(390));
        let table = join(&[matched("Scope", 0, &text)], &index());
        assert_eq!(table.records[0].context_row.chars().count(), JOINED_CONTEXT_CHARS);
    }

    #[test]
    fn test_candidates_are_distinct_in_first_seen_order() {
        let rows = vec![
            matched("Scope", 0, "RL.8.1"),
            matched("Pacing", 0, "RL.8.1 L.8.6"),
        ];
        let table = join(&rows, &index());

        let codes: Vec<&str> = table.candidates().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["CCSS.RL.8.1", "CCSS.L.8.6"]);
        assert_eq!(table.records_for(&StandardCode::new("RL.8.1")).len(), 2);
        assert_eq!(
            table.candidate_lines(),
            "CCSS.RL.8.1: Cite textual evidence\nCCSS.L.8.6: Interpret figures of speech"
        );
    }
}
