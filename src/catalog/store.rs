use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::columns::{detect_columns, ColumnRole};
use crate::core::record::DescriptionEntry;
use crate::core::types::{StandardCode, NO_DESCRIPTION};
use crate::matching::codes::code_from_cell;
use crate::parsing::workbook::{load_source, SourceError, Workbook};

#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(
        "Could not detect a unique {role} column in sheet '{sheet}' (matching: [{}]). Found: [{}]",
        .candidates.join(", "),
        .found.join(", ")
    )]
    ColumnAmbiguity {
        sheet: String,
        role: ColumnRole,
        candidates: Vec<String>,
        found: Vec<String>,
    },
}

/// Code → description lookup built from a reference description table
#[derive(Debug, Clone, Default)]
pub struct DescriptionIndex {
    /// Entries in source row order, one per distinct code
    entries: Vec<DescriptionEntry>,

    /// Index: canonical code -> position in entries
    code_to_index: HashMap<StandardCode, usize>,
}

impl DescriptionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from entries; the first entry for each code wins
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = DescriptionEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.add_entry(entry);
        }
        index
    }

    /// Load the description sheet named `sheet_label` from a tabular source.
    ///
    /// # Errors
    ///
    /// Returns `DescriptionError::Source` if the source cannot be read or has no
    /// sheet with that exact name, or `DescriptionError::ColumnAmbiguity` if the
    /// code and description columns cannot be identified.
    pub fn load(path: &Path, sheet_label: &str) -> Result<Self, DescriptionError> {
        let workbook = load_source(path)?;
        let index = Self::from_workbook(&workbook, sheet_label)?;
        info!(
            source = %path.display(),
            sheet = sheet_label,
            entries = index.len(),
            "Loaded standard descriptions"
        );
        Ok(index)
    }

    /// Build the index from an already-loaded workbook.
    ///
    /// Rows with a blank code are skipped. Codes and descriptions are trimmed.
    ///
    /// # Errors
    ///
    /// See [`DescriptionIndex::load`].
    pub fn from_workbook(workbook: &Workbook, sheet_label: &str) -> Result<Self, DescriptionError> {
        let sheet = workbook.sheet(sheet_label)?;
        let grid = &sheet.grid;

        let columns =
            detect_columns(grid.columns()).map_err(|conflict| DescriptionError::ColumnAmbiguity {
                sheet: sheet.name.clone(),
                role: conflict.role,
                candidates: conflict.candidates,
                found: grid.headers.clone(),
            })?;

        let mut index = Self::new();
        let mut skipped = 0usize;
        for row in 0..grid.rows.len() {
            let code = grid.cell(row, columns.code).trim();
            if code.is_empty() {
                continue;
            }
            let description = grid.cell(row, columns.description).trim();
            if !index.add_entry(DescriptionEntry::new(code_from_cell(code), description)) {
                skipped += 1;
            }
        }

        debug!(
            sheet = %sheet.name,
            entries = index.len(),
            duplicates = skipped,
            "Built description index"
        );

        Ok(index)
    }

    /// Add an entry unless its code is already present. Returns whether it was added.
    pub fn add_entry(&mut self, entry: DescriptionEntry) -> bool {
        if self.code_to_index.contains_key(&entry.code) {
            return false;
        }
        self.code_to_index
            .insert(entry.code.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Get the entry for a code
    #[must_use]
    pub fn get(&self, code: &StandardCode) -> Option<&DescriptionEntry> {
        self.code_to_index.get(code).map(|&idx| &self.entries[idx])
    }

    /// Description for a code, or the no-description sentinel
    #[must_use]
    pub fn describe(&self, code: &StandardCode) -> &str {
        self.get(code)
            .map_or(NO_DESCRIPTION, |entry| entry.description.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[DescriptionEntry] {
        &self.entries
    }

    /// Number of distinct codes in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
