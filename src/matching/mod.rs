//! Row matching, code extraction, and the standards join.
//!
//! This module provides the three pure stages of the pipeline:
//!
//! - [`RowMatcher`]: Finds rows that mention a whole target triple
//! - [`extract_codes`]: Pulls canonical standard codes out of free text
//! - [`join`]: Pairs matched rows with extracted codes and their descriptions
//!
//! ## Joining
//!
//! 1. **Extraction**: every matched row's `context_row` is scanned for codes
//! 2. **Lookup**: each code is described from the [`DescriptionIndex`], falling back
//!    to a fixed sentinel when absent
//! 3. **Dedup**: records are unique on `(code, sheet)`, first occurrence wins
//! 4. **Fallback**: if no row yields any code, the first row of each sheet is
//!    emitted uncoded
//!
//! ## Example
//!
//! ```rust,no_run
//! use standards_align::catalog::DescriptionIndex;
//! use standards_align::core::types::TargetTriple;
//! use standards_align::matching::{join, RowMatcher};
//! use standards_align::parsing::load_source;
//! use std::path::Path;
//!
//! let workbook = load_source(Path::new("scope_and_sequence.xlsx")).unwrap();
//! let matcher = RowMatcher::new(&TargetTriple::default()).unwrap();
//! let rows = matcher.extract(&workbook).unwrap();
//!
//! let index = DescriptionIndex::load(Path::new("ela_standards.xlsx"), "Grade 8").unwrap();
//! let table = join(&rows, &index);
//! println!("{}", table.candidate_lines());
//! ```
//!
//! [`DescriptionIndex`]: crate::catalog::DescriptionIndex

pub mod codes;
pub mod join;
pub mod rows;

pub use codes::extract_codes;
pub use join::{join, Candidate, JoinedTable};
pub use rows::{extract_rows, MatchError, RowMatcher};
