use std::path::Path;

use crate::parsing::workbook::{Grid, Sheet, SourceError, Workbook};
use crate::utils::text::check_row_limit;

/// Name given to the single sheet of a delimited file with no usable file stem
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Load a CSV/TSV file as a one-sheet workbook named after the file stem
///
/// # Errors
///
/// Returns `SourceError::Io` if the file cannot be read, or other errors if the
/// content is not valid delimited text.
pub fn load_delimited_file(path: &Path, delimiter: u8) -> Result<Workbook, SourceError> {
    let content = std::fs::read_to_string(path)?;
    let sheet_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_SHEET_NAME);
    parse_delimited_text(&content, delimiter, sheet_name)
}

/// Parse delimited text into a one-sheet workbook. The first record is the header.
///
/// # Errors
///
/// Returns `SourceError::Csv` on malformed quoting or
/// `SourceError::TooManyRows` if the limit is exceeded.
pub fn parse_delimited_text(
    text: &str,
    delimiter: u8,
    sheet_name: &str,
) -> Result<Workbook, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if check_row_limit(rows.len()).is_some() {
            return Err(SourceError::TooManyRows {
                sheet: sheet_name.to_string(),
                count: rows.len() + 1,
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let grid = Grid::new(headers, rows);
    Ok(Workbook::new(vec![Sheet::new(sheet_name, grid)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_text() {
        let csv = "Grade,Unit,Module,Standards
Grade 8,Unit 1,Module 2,\"RL.8.1, RL.8.2\"
Grade 8,Unit 1,Module 3,W.8.1
";

        let workbook = parse_delimited_text(csv, b',', "Scope").unwrap();
        assert_eq!(workbook.len(), 1);
        let sheet = workbook.sheet("Scope").unwrap();
        assert_eq!(sheet.grid.headers, vec!["Grade", "Unit", "Module", "Standards"]);
        assert_eq!(sheet.grid.rows.len(), 2);
        assert_eq!(sheet.grid.cell(0, 3), "RL.8.1, RL.8.2");
    }

    #[test]
    fn test_parse_tsv_ragged_rows() {
        let tsv = "Grade\tUnit\nGrade 8\tUnit 1\tModule 2\nGrade 8\n";
        let workbook = parse_delimited_text(tsv, b'\t', "Scope").unwrap();
        let grid = &workbook.sheets[0].grid;
        assert_eq!(grid.headers.len(), 3);
        assert_eq!(grid.rows[0], vec!["Grade 8", "Unit 1", "Module 2"]);
        assert_eq!(grid.rows[1], vec!["Grade 8", "", ""]);
    }

    #[test]
    fn test_parse_empty_text() {
        let workbook = parse_delimited_text("", b',', "Empty").unwrap();
        assert!(workbook.sheets[0].grid.is_empty());
    }
}
