//! End-to-end standards pipeline.
//!
//! 1. Load the scope-and-sequence workbook and find rows for the target triple
//! 2. Load the description table from the grade sheet of the descriptions workbook
//! 3. Join extracted codes with descriptions
//! 4. Optionally write the three tables to an output directory
//!
//! Every stage must succeed before anything is written; a failed run leaves no
//! partial output behind.

pub mod config;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::catalog::store::{DescriptionError, DescriptionIndex};
use crate::core::row::MatchedRow;
use crate::core::types::TargetTriple;
use crate::export::{write_tables, ExportError, TablePaths};
use crate::matching::join::{join, JoinedTable};
use crate::matching::rows::{MatchError, RowMatcher};
use crate::parsing::workbook::{load_source, SourceError};

pub use config::PipelineConfig;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub target: TargetTriple,
    pub matched_rows: Vec<MatchedRow>,
    pub descriptions: DescriptionIndex,
    pub joined: JoinedTable,
}

/// Counts describing a run, for reporting
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub target: TargetTriple,
    pub matched_rows: usize,
    pub descriptions: usize,
    pub joined_records: usize,
    pub distinct_codes: usize,
    pub missing_descriptions: usize,
    pub fallback: bool,
    pub generated_at: DateTime<Utc>,
}

impl PipelineOutput {
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            target: self.target.clone(),
            matched_rows: self.matched_rows.len(),
            descriptions: self.descriptions.len(),
            joined_records: self.joined.len(),
            distinct_codes: self.joined.candidates().len(),
            missing_descriptions: self
                .joined
                .iter()
                .filter(|r| r.code.is_some() && !r.has_description())
                .count(),
            fallback: self.joined.fallback,
            generated_at: Utc::now(),
        }
    }

    /// Write the extracted, description and joined tables into `dir`
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Export` if any table cannot be written.
    pub fn write_tables(&self, dir: &Path) -> Result<TablePaths, PipelineError> {
        Ok(write_tables(
            dir,
            &self.matched_rows,
            self.descriptions.entries(),
            &self.joined.records,
        )?)
    }
}

/// Run the load, extract, describe and join stages.
///
/// # Errors
///
/// Returns the first stage error: a missing or unreadable source, a missing
/// description sheet, unresolvable description columns, or no matching rows.
pub fn run(
    reference: &Path,
    descriptions: &Path,
    config: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    config.validate()?;
    let target = config.target.clone();

    // Fail on bad labels before touching any file
    let matcher = RowMatcher::new(&target)?;

    let workbook = load_source(reference)?;
    info!(
        source = %reference.display(),
        sheets = workbook.len(),
        rows = workbook.row_count(),
        "Loaded reference workbook"
    );

    let matched_rows = matcher.extract(&workbook)?;
    info!(rows = matched_rows.len(), "Extracted rows for {target}");

    let descriptions = DescriptionIndex::load(descriptions, config.description_sheet())?;

    let joined = join(&matched_rows, &descriptions);
    info!(
        records = joined.len(),
        fallback = joined.fallback,
        "Joined standards"
    );

    Ok(PipelineOutput {
        target,
        matched_rows,
        descriptions,
        joined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let descriptions = dir.path().join("descriptions.csv");
        std::fs::write(&descriptions, "CCSS Code,CCSS Standard\nL.8.6,Figures\n").unwrap();

        let result = run(
            &dir.path().join("missing.xlsx"),
            &descriptions,
            &PipelineConfig::default(),
        );
        assert!(matches!(
            result,
            Err(PipelineError::Source(SourceError::NotFound(_)))
        ));
    }

    #[test]
    fn test_blank_label_rejected_before_loading() {
        let mut config = PipelineConfig::default();
        config.target.module = String::new();
        let result = run(Path::new("missing.xlsx"), Path::new("missing.csv"), &config);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
