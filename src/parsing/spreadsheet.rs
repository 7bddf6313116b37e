use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::parsing::workbook::{Grid, Sheet, SourceError, Workbook};
use crate::utils::text::check_row_limit;

/// Read every worksheet of an xlsx/xls/ods file, in workbook order.
///
/// The first row of each sheet is taken as the header row.
///
/// # Errors
///
/// Returns `SourceError::Workbook` if the file cannot be opened or a sheet cannot be
/// read, or `SourceError::TooManyRows` if a sheet exceeds the row limit.
pub fn load_spreadsheet(path: &Path) -> Result<Workbook, SourceError> {
    let mut workbook = open_workbook_auto(path)?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let grid = range_to_grid(&name, &range)?;
        sheets.push(Sheet::new(name, grid));
    }

    Ok(Workbook::new(sheets))
}

fn range_to_grid(sheet: &str, range: &Range<Data>) -> Result<Grid, SourceError> {
    let mut rows_iter = range.rows();

    let Some(header_row) = rows_iter.next() else {
        return Ok(Grid::default());
    };
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

    let mut rows = Vec::new();
    for row in rows_iter {
        if check_row_limit(rows.len()).is_some() {
            return Err(SourceError::TooManyRows {
                sheet: sheet.to_string(),
                count: rows.len() + 1,
            });
        }
        rows.push(row.iter().map(cell_to_string).collect());
    }

    Ok(Grid::new(headers, rows))
}

/// Coerce a cell to text; empty and error cells become empty strings
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        _ => cell.to_string(),
    }
}
