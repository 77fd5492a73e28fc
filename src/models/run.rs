use serde::{Deserialize, Serialize};

graphql_enum! {
    /// Lifecycle state of an analysis run.
    #[derive(Default)]
    pub enum RunStatus {
        Pending => "PENDING",
        Success => "SUCCESS",
        Failure => "FAILURE",
        Timeout => "TIMEOUT",
        Cancel => "CANCEL",
        Ready => "READY",
        Skipped => "SKIPPED",
        #[default]
        Unknown => "UNKNOWN",
    }
}

/// One analysis run, triggered by a commit or pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub id: String,
    pub run_uid: String,
    pub commit_oid: String,
    pub branch_name: Option<String>,
    pub base_oid: Option<String>,
    pub status: RunStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub finished_at: Option<String>,
    pub summary: RunSummary,
    pub repository: RunRepository,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub occurrences_introduced: u64,
    pub occurrences_resolved: u64,
    pub occurrences_suppressed: u64,
    pub by_analyzer: Vec<AnalyzerDistribution>,
    pub by_category: Vec<CategoryDistribution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerDistribution {
    pub analyzer_shortcode: String,
    pub introduced: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDistribution {
    pub category: String,
    pub introduced: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRepository {
    pub id: Option<String>,
    pub name: String,
}
