use serde::{Deserialize, Serialize};

/// Namespace prefix every canonical standard code carries
pub const CODE_NAMESPACE: &str = "CCSS";

/// Description used when a code has no entry in the description table
pub const NO_DESCRIPTION: &str = "(no description found)";

/// A canonical standard code such as `CCSS.RL.8.1` or `CCSS.W.8.3A`.
///
/// Construction always normalizes: surrounding whitespace is trimmed, the text is
/// uppercased, any existing namespace prefix is stripped and the canonical one is
/// prepended. Two spellings that differ only in case or in the presence of the
/// prefix therefore compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardCode(String);

impl StandardCode {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_code(raw.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code without its namespace prefix (e.g. `L.8.6`)
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0
            .strip_prefix(CODE_NAMESPACE)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for StandardCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StandardCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a code spelling to its canonical form.
///
/// Idempotent: `normalize_code(&normalize_code(x)) == normalize_code(x)`.
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let ns_dot = format!("{CODE_NAMESPACE}.");
    let local = upper.trim_start_matches(ns_dot.as_str());
    format!("{ns_dot}{local}")
}

/// The (grade, unit, module) labels a pipeline run filters for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTriple {
    pub grade: String,
    pub unit: String,
    pub module: String,
}

impl TargetTriple {
    pub fn new(
        grade: impl Into<String>,
        unit: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            grade: grade.into(),
            unit: unit.into(),
            module: module.into(),
        }
    }

    /// Labels in grade, unit, module order
    #[must_use]
    pub fn labels(&self) -> [&str; 3] {
        [&self.grade, &self.unit, &self.module]
    }
}

impl Default for TargetTriple {
    fn default() -> Self {
        Self::new("Grade 8", "Unit 1", "Module 2")
    }
}

impl std::fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.grade, self.unit, self.module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization_ignores_case_and_prefix() {
        assert_eq!(StandardCode::new("ccss.l.8.6"), StandardCode::new("L.8.6"));
        assert_eq!(StandardCode::new(" RL.8.1 ").as_str(), "CCSS.RL.8.1");
        assert_eq!(StandardCode::new("w.8.3a").as_str(), "CCSS.W.8.3A");
    }

    #[test]
    fn test_normalize_code_is_idempotent() {
        for raw in ["L.8.6", "ccss.rl.8.10", "CCSS.CCSS.W.8.1", "  sl.8.4b"] {
            let once = normalize_code(raw);
            assert_eq!(normalize_code(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_local_part() {
        assert_eq!(StandardCode::new("CCSS.RI.8.2").local_part(), "RI.8.2");
    }

    #[test]
    fn test_default_target() {
        let target = TargetTriple::default();
        assert_eq!(target.labels(), ["Grade 8", "Unit 1", "Module 2"]);
        assert_eq!(target.to_string(), "Grade 8 / Unit 1 / Module 2");
    }
}
