use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::types::TargetTriple;
use crate::pipeline::PipelineError;

/// Settings for one pipeline run.
///
/// Every field is optional in the JSON form; missing fields take defaults. Values
/// given on the command line override the file.
///
/// ```json
/// {
///   "reference": "data/scope_and_sequence.xlsx",
///   "descriptions": "data/ela_standards.xlsx",
///   "target": { "grade": "Grade 8", "unit": "Unit 1", "module": "Module 2" },
///   "output_dir": "output"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Scope-and-sequence workbook scanned for module rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,

    /// Workbook holding the code/description table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<PathBuf>,

    pub target: TargetTriple,

    /// Sheet of the descriptions workbook to read; defaults to the grade label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_sheet: Option<String>,

    /// Directory the persisted tables are written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl PipelineConfig {
    /// Load a config from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `PipelineError::Config` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        serde_json::from_str(json).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Sheet to read descriptions from
    #[must_use]
    pub fn description_sheet(&self) -> &str {
        self.description_sheet
            .as_deref()
            .unwrap_or(&self.target.grade)
    }

    /// Reject blank target labels
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Config` naming the first blank label.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let names = ["grade", "unit", "module"];
        for (name, label) in names.iter().zip(self.target.labels()) {
            if label.trim().is_empty() {
                return Err(PipelineError::Config(format!(
                    "target {name} label must not be blank"
                )));
            }
        }
        if self.description_sheet().trim().is_empty() {
            return Err(PipelineError::Config(
                "description sheet name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.target, TargetTriple::default());
        assert_eq!(config.description_sheet(), "Grade 8");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = PipelineConfig::from_json(
            r#"{"reference": "scope.xlsx", "target": {"grade": "Grade 7", "unit": "Unit 3", "module": "Module 1"}}"#,
        )
        .unwrap();
        assert_eq!(config.reference, Some(PathBuf::from("scope.xlsx")));
        assert_eq!(config.target.grade, "Grade 7");
        assert_eq!(config.description_sheet(), "Grade 7");
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_explicit_description_sheet() {
        let config = PipelineConfig {
            description_sheet: Some("Gr8 Standards".to_string()),
            ..PipelineConfig::default()
        };
        assert_eq!(config.description_sheet(), "Gr8 Standards");
    }

    #[test]
    fn test_blank_label_rejected() {
        let mut config = PipelineConfig::default();
        config.target.unit = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unit"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PipelineConfig::from_json("{not json"),
            Err(PipelineError::Config(_))
        ));
    }
}
