//! Writers for the flat tables handed to downstream stages.
//!
//! | File                        | Columns |
//! |-----------------------------|---------|
//! | `extracted_standards.csv`   | `sheet, row, context_above, context_row` |
//! | `standard_descriptions.csv` | `Standard_Code, Description` |
//! | `joined_standards.csv`      | `sheet, context_row, Standard_Code, Description` |
//!
//! An uncoded joined record is written with an empty `Standard_Code` cell. The
//! header row is always written, even for a table with no records.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::record::{DescriptionEntry, JoinedRecord};
use crate::core::row::MatchedRow;

/// File name of the extracted-rows table
pub const EXTRACTED_FILE: &str = "extracted_standards.csv";

/// File name of the descriptions table
pub const DESCRIPTIONS_FILE: &str = "standard_descriptions.csv";

/// File name of the joined table
pub const JOINED_FILE: &str = "joined_standards.csv";

/// A record type persisted as one table row
pub trait TableRow: Serialize {
    /// Column names, in the order the record serializes its fields
    const HEADERS: &'static [&'static str];
}

impl TableRow for MatchedRow {
    const HEADERS: &'static [&'static str] = &["sheet", "row", "context_above", "context_row"];
}

impl TableRow for DescriptionEntry {
    const HEADERS: &'static [&'static str] = &["Standard_Code", "Description"];
}

impl TableRow for JoinedRecord {
    const HEADERS: &'static [&'static str] =
        &["sheet", "context_row", "Standard_Code", "Description"];
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),
}

/// Write records with a header row to any writer
///
/// # Errors
///
/// Returns `ExportError::Csv` if a record cannot be serialized or written.
pub fn write_records<W, T>(writer: W, records: &[T], delimiter: u8) -> Result<(), ExportError>
where
    W: Write,
    T: TableRow,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write records as a CSV file, replacing any existing file
///
/// # Errors
///
/// Returns `ExportError::Io` if the file cannot be created, or
/// `ExportError::Csv` if writing fails.
pub fn write_csv<T: TableRow>(path: &Path, records: &[T]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records(std::io::BufWriter::new(file), records, b',')
}

/// Paths of the three persisted tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePaths {
    pub extracted: PathBuf,
    pub descriptions: PathBuf,
    pub joined: PathBuf,
}

impl TablePaths {
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            extracted: dir.join(EXTRACTED_FILE),
            descriptions: dir.join(DESCRIPTIONS_FILE),
            joined: dir.join(JOINED_FILE),
        }
    }
}

/// Write all three tables into `dir`, creating it if needed
///
/// # Errors
///
/// Returns `ExportError::Io` if the directory or a file cannot be created, or
/// `ExportError::Csv` if writing fails.
pub fn write_tables(
    dir: &Path,
    rows: &[MatchedRow],
    descriptions: &[DescriptionEntry],
    joined: &[JoinedRecord],
) -> Result<TablePaths, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = TablePaths::in_dir(dir);
    write_csv(&paths.extracted, rows)?;
    write_csv(&paths.descriptions, descriptions)?;
    write_csv(&paths.joined, joined)?;

    tracing::info!(dir = %dir.display(), "Wrote standards tables");
    Ok(paths)
}
