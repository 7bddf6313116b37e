use serde::{Deserialize, Serialize};

use crate::core::types::{StandardCode, NO_DESCRIPTION};

/// A code and its description from the reference description table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    #[serde(rename = "Standard_Code")]
    pub code: StandardCode,

    #[serde(rename = "Description")]
    pub description: String,
}

impl DescriptionEntry {
    pub fn new(code: StandardCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

/// A matched row joined with one extracted code and its description.
///
/// `code` is `None` only for records emitted in fallback mode; the description is
/// then [`NO_DESCRIPTION`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub sheet: String,

    pub context_row: String,

    #[serde(rename = "Standard_Code")]
    pub code: Option<StandardCode>,

    #[serde(rename = "Description")]
    pub description: String,
}

impl JoinedRecord {
    pub fn new(
        sheet: impl Into<String>,
        context_row: impl Into<String>,
        code: StandardCode,
        description: impl Into<String>,
    ) -> Self {
        Self {
            sheet: sheet.into(),
            context_row: context_row.into(),
            code: Some(code),
            description: description.into(),
        }
    }

    /// A record with no code, used when nothing could be extracted from any row
    pub fn uncoded(sheet: impl Into<String>, context_row: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            context_row: context_row.into(),
            code: None,
            description: NO_DESCRIPTION.to_string(),
        }
    }

    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description != NO_DESCRIPTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncoded_record_uses_sentinel() {
        let record = JoinedRecord::uncoded("Scope", "Grade 8 | Unit 1 | Module 2");
        assert!(record.code.is_none());
        assert_eq!(record.description, NO_DESCRIPTION);
        assert!(!record.has_description());
    }

    #[test]
    fn test_joined_record_serializes_with_table_column_names() {
        let record = JoinedRecord::new(
            "Scope",
            "row text",
            StandardCode::new("L.8.6"),
            "Interpret figures of speech",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sheet"], "Scope");
        assert_eq!(json["Standard_Code"], "CCSS.L.8.6");
        assert_eq!(json["Description"], "Interpret figures of speech");
    }
}
