use crate::core::types::CODE_NAMESPACE;
use crate::utils::text::normalize_header;

/// Token that, together with the namespace, marks the code column
const CODE_TOKEN: &str = "code";

/// Token that, together with the namespace, marks the description column
const STANDARD_TOKEN: &str = "standard";

/// Which description-table column a header search was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Code,
    Description,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Description => write!(f, "standard description"),
        }
    }
}

/// Why a column could not be resolved: the role searched for and the headers that
/// satisfied its predicate (none, or more than one)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConflict {
    pub role: ColumnRole,
    pub candidates: Vec<String>,
}

/// Column positions of the code and description fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionColumns {
    pub code: usize,
    pub description: usize,
}

/// Locate the code and description columns among `(header, column_index)` pairs.
///
/// A header qualifies as the code column when its lowercased, trimmed name contains
/// both the namespace token and `code`; the description column needs the namespace
/// token and `standard`, and may not be the code column. Each must resolve to
/// exactly one column. Column order is irrelevant.
///
/// # Errors
///
/// Returns the conflicting role and its candidate headers when a column is missing
/// or ambiguous.
pub fn detect_columns<'a, I>(columns: I) -> Result<DescriptionColumns, ColumnConflict>
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let namespace = CODE_NAMESPACE.to_lowercase();
    let normalized: Vec<(String, &str, usize)> = columns
        .into_iter()
        .map(|(header, idx)| (normalize_header(header), header, idx))
        .collect();

    let code = unique_column(&normalized, ColumnRole::Code, |name, _| {
        name.contains(namespace.as_str()) && name.contains(CODE_TOKEN)
    })?;

    let description = unique_column(&normalized, ColumnRole::Description, |name, idx| {
        idx != code && name.contains(namespace.as_str()) && name.contains(STANDARD_TOKEN)
    })?;

    Ok(DescriptionColumns { code, description })
}

fn unique_column<F>(
    columns: &[(String, &str, usize)],
    role: ColumnRole,
    predicate: F,
) -> Result<usize, ColumnConflict>
where
    F: Fn(&str, usize) -> bool,
{
    let matches: Vec<(&str, usize)> = columns
        .iter()
        .filter(|(name, _, idx)| predicate(name.as_str(), *idx))
        .map(|(_, header, idx)| (*header, *idx))
        .collect();

    match matches.as_slice() {
        [(_, idx)] => Ok(*idx),
        _ => Err(ColumnConflict {
            role,
            candidates: matches.iter().map(|(h, _)| (*h).to_string()).collect(),
        }),
    }
}
