use serde::{Deserialize, Serialize};

graphql_enum! {
    /// Severity assigned to an issue by its analyzer.
    #[derive(Default)]
    pub enum IssueSeverity {
        Critical => "CRITICAL",
        Major => "MAJOR",
        Minor => "MINOR",
        #[default]
        Unknown => "UNKNOWN",
    }
}

/// An issue reported on a repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub shortcode: String,
    pub title: String,
    pub category: String,
    pub severity: IssueSeverity,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub occurrences: Vec<IssueOccurrence>,
}

/// Where an issue was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueOccurrence {
    pub path: String,
    pub begin_line: Option<u64>,
    pub end_line: Option<u64>,
}
