use serde::{Deserialize, Serialize};

/// One spreadsheet row whose text mentions every label of the target triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedRow {
    /// Sheet the row was found in
    #[serde(rename = "sheet")]
    pub source_sheet: String,

    /// Zero-based data row index within the sheet (header excluded)
    #[serde(rename = "row")]
    pub row_index: usize,

    /// Normalized text of the preceding row, empty for the first data row
    pub context_above: String,

    /// Normalized text of the row itself
    pub context_row: String,
}

impl MatchedRow {
    pub fn new(
        source_sheet: impl Into<String>,
        row_index: usize,
        context_above: impl Into<String>,
        context_row: impl Into<String>,
    ) -> Self {
        Self {
            source_sheet: source_sheet.into(),
            row_index,
            context_above: context_above.into(),
            context_row: context_row.into(),
        }
    }
}
