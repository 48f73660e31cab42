use serde::{Deserialize, Serialize};

/// What went wrong with a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Row had too few fields and was skipped
    MalformedRow,
    /// Value column was not a number; the row was kept with no value
    NonNumericValue,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::MalformedRow => write!(f, "Malformed row"),
            IssueKind::NonNumericValue => write!(f, "Non-numeric value"),
        }
    }
}

/// A problem found while parsing a row, reported instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseIssue {
    /// 1-based line number in the source text
    pub line: usize,
    pub kind: IssueKind,
    pub message: String,
}
