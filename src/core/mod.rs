//! Core data types for standards extraction and joining.
//!
//! - [`StandardCode`]: A canonical standard identifier (`CCSS.RL.8.1`)
//! - [`TargetTriple`]: The grade/unit/module labels a run filters for
//! - [`MatchedRow`]: A spreadsheet row that mentions the whole target triple
//! - [`DescriptionEntry`]: A code and its description from the reference table
//! - [`JoinedRecord`]: A matched row paired with one extracted code and its description
//!
//! ## Code Normalization
//!
//! Codes are compared in canonical form only. The same standard can be spelled in
//! several ways across spreadsheets:
//!
//! | Spelling      | Canonical     |
//! |---------------|---------------|
//! | `L.8.6`       | `CCSS.L.8.6`  |
//! | `ccss.l.8.6`  | `CCSS.L.8.6`  |
//! | `w.8.3a`      | `CCSS.W.8.3A` |
//!
//! [`StandardCode`]: types::StandardCode
//! [`TargetTriple`]: types::TargetTriple
//! [`MatchedRow`]: row::MatchedRow
//! [`DescriptionEntry`]: record::DescriptionEntry
//! [`JoinedRecord`]: record::JoinedRecord

pub mod record;
pub mod row;
pub mod types;
