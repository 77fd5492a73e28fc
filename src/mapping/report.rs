use serde_json::Value;

use crate::mapping::{MalformedNode, count, enum_field, opt_f64, opt_str, required_str};
use crate::models::{
    ComplianceReport, OccurrenceCounts, ReportStatus, ReportType, SecurityIssueStat,
};

const KIND: &str = "compliance report";

/// Map a report object found under `repository.reports.<field>`.
pub fn map_report(
    report_type: ReportType,
    node: &Value,
) -> Result<ComplianceReport, MalformedNode> {
    let stats = node
        .get("securityIssueStats")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(map_stat).collect())
        .unwrap_or_default();

    Ok(ComplianceReport {
        key: report_type,
        title: required_str(node, KIND, "title")?,
        current_value: opt_f64(node, "currentValue"),
        status: enum_field::<ReportStatus>(node, "status").unwrap_or_default(),
        security_issue_stats: stats,
    })
}

fn map_stat(entry: &Value) -> Option<SecurityIssueStat> {
    let occurrence = entry
        .get("occurrence")
        .map(|o| OccurrenceCounts {
            critical: count(o, "critical"),
            major: count(o, "major"),
            minor: count(o, "minor"),
            total: count(o, "total"),
        })
        .unwrap_or_default();

    Some(SecurityIssueStat {
        key: opt_str(entry, "key")?,
        title: opt_str(entry, "title").unwrap_or_default(),
        occurrence,
    })
}
