use serde::{Deserialize, Serialize};

graphql_enum! {
    /// Compliance reports available per repository.
    pub enum ReportType {
        OwaspTop10 => "OWASP_TOP_10",
        SansTop25 => "SANS_TOP_25",
        MisraC => "MISRA_C",
    }
}

impl ReportType {
    /// Field holding this report under `repository.reports`.
    pub fn field_name(&self) -> &'static str {
        match self {
            ReportType::OwaspTop10 => "owaspTop10",
            ReportType::SansTop25 => "sansTop25",
            ReportType::MisraC => "misraC",
        }
    }
}

graphql_enum! {
    #[derive(Default)]
    pub enum ReportStatus {
        Passing => "PASSING",
        Failing => "FAILING",
        #[default]
        Noop => "NOOP",
    }
}

/// Security posture summary for one compliance standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub key: ReportType,
    pub title: String,
    pub current_value: Option<f64>,
    pub status: ReportStatus,
    pub security_issue_stats: Vec<SecurityIssueStat>,
}

/// Issue counts for one category of a standard (e.g. `A01`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityIssueStat {
    pub key: String,
    pub title: String,
    pub occurrence: OccurrenceCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceCounts {
    pub critical: u64,
    pub major: u64,
    pub minor: u64,
    pub total: u64,
}
