use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::text::MAX_SHEET_ROWS;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Sheet '{sheet}' not found (available sheets: {})", .available.join(", "))]
    SheetAbsent {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Sheet '{sheet}' has too many rows: {count} exceeds maximum allowed ({})", MAX_SHEET_ROWS)]
    TooManyRows { sheet: String, count: usize },
}

/// A rectangular table of text cells with a header row.
///
/// Every data row has exactly as many cells as there are headers; missing cells are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid, padding or truncating rows so all line up with the widest row
    #[must_use]
    pub fn new(mut headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let column_count = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(headers.len());

        headers.resize(column_count, String::new());
        for row in &mut rows {
            row.resize(column_count, String::new());
        }

        Self { headers, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(header, column_index)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (header.as_str(), idx))
    }

    /// Cell text at `(row, column)`, empty when out of range
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }
}

/// A named grid within a workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// An in-memory snapshot of a tabular source: sheets in their original order
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    #[must_use]
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Look up a sheet by exact name
    ///
    /// # Errors
    ///
    /// Returns `SourceError::SheetAbsent` listing the available sheets if no sheet
    /// has that name.
    pub fn sheet(&self, name: &str) -> Result<&Sheet, SourceError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SourceError::SheetAbsent {
                sheet: name.to_string(),
                available: self.sheet_names(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Total data rows across all sheets
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|s| s.grid.rows.len()).sum()
    }
}

/// Supported tabular source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// xlsx, xlsm, xlsb, xls or ods, read with calamine
    Spreadsheet,
    /// Comma-separated text
    Csv,
    /// Tab-separated text
    Tsv,
}

impl SourceFormat {
    /// Detect the format from a file extension
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Some(Self::Spreadsheet),
            Some("csv") => Some(Self::Csv),
            Some("tsv" | "tab") => Some(Self::Tsv),
            _ => None,
        }
    }
}

/// Load a tabular source into a [`Workbook`], choosing the reader by extension.
///
/// # Errors
///
/// Returns `SourceError::NotFound` if the path does not exist,
/// `SourceError::UnsupportedFormat` for unknown extensions, or a reader error if
/// the file cannot be parsed.
pub fn load_source(path: &Path) -> Result<Workbook, SourceError> {
    if !path.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let format = SourceFormat::detect(path).ok_or_else(|| {
        SourceError::UnsupportedFormat(
            path.extension()
                .map_or_else(|| path.display().to_string(), |e| e.to_string_lossy().into_owned()),
        )
    })?;

    let workbook = match format {
        SourceFormat::Spreadsheet => super::spreadsheet::load_spreadsheet(path)?,
        SourceFormat::Csv => super::tsv::load_delimited_file(path, b',')?,
        SourceFormat::Tsv => super::tsv::load_delimited_file(path, b'\t')?,
    };

    tracing::debug!(
        source = %path.display(),
        sheets = workbook.len(),
        rows = workbook.row_count(),
        "Loaded tabular source"
    );

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_grid_aligns_ragged_rows() {
        let grid = Grid::new(
            strings(&["a", "b"]),
            vec![strings(&["1"]), strings(&["1", "2", "3"])],
        );
        assert_eq!(grid.headers, strings(&["a", "b", ""]));
        assert_eq!(grid.rows[0], strings(&["1", "", ""]));
        assert_eq!(grid.rows[1].len(), 3);
        assert_eq!(grid.cell(0, 2), "");
        assert_eq!(grid.cell(5, 0), "");
    }

    #[test]
    fn test_sheet_lookup() {
        let workbook = Workbook::new(vec![
            Sheet::new("Grade 7", Grid::default()),
            Sheet::new("Grade 8", Grid::default()),
        ]);
        assert_eq!(workbook.sheet("Grade 8").unwrap().name, "Grade 8");

        match workbook.sheet("grade 8") {
            Err(SourceError::SheetAbsent { sheet, available }) => {
                assert_eq!(sheet, "grade 8");
                assert_eq!(available, strings(&["Grade 7", "Grade 8"]));
            }
            other => panic!("expected SheetAbsent, got {other:?}"),
        }
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            SourceFormat::detect(Path::new("scope.XLSX")),
            Some(SourceFormat::Spreadsheet)
        );
        assert_eq!(
            SourceFormat::detect(Path::new("rows.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::detect(Path::new("rows.tsv")),
            Some(SourceFormat::Tsv)
        );
        assert_eq!(SourceFormat::detect(Path::new("guide.pdf")), None);
    }

    #[test]
    fn test_load_missing_source() {
        let result = load_source(Path::new("/nonexistent/scope.xlsx"));
        assert!(matches!(result, Err(SourceError::NotFound(_))));
    }
}
