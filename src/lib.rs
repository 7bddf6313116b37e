//! # standards-align
//!
//! A library for pulling module-level educational standards out of scope-and-sequence
//! spreadsheets and joining them with standard descriptions.
//!
//! Curriculum spreadsheets mention standards in free text, spread across many sheets
//! with inconsistent layouts. `standards-align` finds the rows for one grade, unit
//! and module, extracts every standard code they mention, and pairs each code with
//! its description, producing a flat table that downstream alignment tools consume.
//!
//! ## Features
//!
//! - **Layout-agnostic row matching**: Rows qualify when their text mentions the
//!   grade, unit and module labels anywhere, in any cell
//! - **Code normalization**: `rl.8.1`, `RL.8.1` and `CCSS.RL.8.1` are one code
//! - **Header detection**: Description columns are found by name, not position
//! - **Fallback mode**: When no codes are found anywhere, matched rows are still
//!   passed on, uncoded
//!
//! ## Example
//!
//! ```rust,no_run
//! use standards_align::{join, DescriptionIndex, RowMatcher, TargetTriple};
//! use standards_align::parsing::load_source;
//! use std::path::Path;
//!
//! let workbook = load_source(Path::new("scope_and_sequence.xlsx")).unwrap();
//! let target = TargetTriple::new("Grade 8", "Unit 1", "Module 2");
//! let rows = RowMatcher::new(&target).unwrap().extract(&workbook).unwrap();
//!
//! let index = DescriptionIndex::load(Path::new("ela_standards.xlsx"), "Grade 8").unwrap();
//! let table = join(&rows, &index);
//!
//! for record in &table {
//!     println!("{:?}: {}", record.code, record.description);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Code → description lookup loaded from a grade sheet
//! - [`core`]: Core data types for codes, matched rows and joined records
//! - [`matching`]: Row matching, code extraction and the join
//! - [`parsing`]: Spreadsheet and delimited-text loaders
//! - [`export`]: Writers for the persisted tables
//! - [`pipeline`]: End-to-end run and configuration
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod export;
pub mod matching;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::DescriptionIndex;
pub use core::record::{DescriptionEntry, JoinedRecord};
pub use core::row::MatchedRow;
pub use core::types::*;
pub use matching::join::{join, JoinedTable};
pub use matching::rows::RowMatcher;
pub use pipeline::{PipelineConfig, PipelineOutput};
