//! Loaders that turn tabular files into in-memory [`Workbook`]s.
//!
//! This module provides readers for:
//!
//! - **Spreadsheets** (xlsx, xlsm, xlsb, xls, ods): every worksheet, in workbook order
//! - **Delimited text** (csv, tsv): a single sheet named after the file stem
//!
//! All cells are coerced to text. Blank or missing cells become empty strings, and
//! ragged rows are padded so every row lines up with the header.
//!
//! ## Example
//!
//! ```rust,no_run
//! use standards_align::parsing::workbook::load_source;
//! use std::path::Path;
//!
//! let workbook = load_source(Path::new("scope_and_sequence.xlsx")).unwrap();
//! for sheet in &workbook.sheets {
//!     println!("{}: {} rows", sheet.name, sheet.grid.rows.len());
//! }
//! ```
//!
//! [`Workbook`]: workbook::Workbook

pub mod spreadsheet;
pub mod tsv;
pub mod workbook;

pub use workbook::{load_source, Grid, Sheet, SourceError, Workbook};
