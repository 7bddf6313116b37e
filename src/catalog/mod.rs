//! Standard description lookup.
//!
//! The description table lives in a reference workbook, on the sheet named after the
//! target grade (e.g. `Grade 8`). Header spelling varies between workbook revisions
//! (`CCSS Code`, `ccss code `, `CCSS Standard Code`), so columns are found by
//! normalized name rather than position.
//!
//! ## Example
//!
//! ```rust,no_run
//! use standards_align::catalog::store::DescriptionIndex;
//! use standards_align::core::types::StandardCode;
//! use std::path::Path;
//!
//! let index = DescriptionIndex::load(Path::new("ela_standards.xlsx"), "Grade 8").unwrap();
//! println!("{}", index.describe(&StandardCode::new("RL.8.1")));
//! ```

pub mod columns;
pub mod store;

pub use store::{DescriptionError, DescriptionIndex};
