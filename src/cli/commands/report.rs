use tabled::builder::Builder;

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_optional, truncate_with_ellipsis};
use crate::client::DeepSourceClient;
use crate::models::{ComplianceReport, ReportType};

/// Show a compliance report for a project
pub async fn get_report(
    client: &DeepSourceClient,
    project_key: &str,
    report_type: ReportType,
    format: &str,
) -> CliResult<String> {
    let Some(report) = client.get_compliance_report(project_key, report_type).await? else {
        return Ok(match format {
            "json" => "null".to_string(),
            _ => format!("No {} report available for {}.", report_type, project_key),
        });
    };

    match format {
        "json" => Ok(serde_json::to_string_pretty(&report)?),
        _ => Ok(format_report(&report)),
    }
}

pub(crate) fn format_report(report: &ComplianceReport) -> String {
    let mut summary = Builder::default();
    summary.push_record(["Field", "Value"]);
    summary.push_record(["Report", &report.title]);
    summary.push_record(["Status", &report.status.to_string()]);
    summary.push_record(["Current value", &format_optional(report.current_value)]);
    let mut summary = summary.build();
    apply_table_style(&mut summary);

    if report.security_issue_stats.is_empty() {
        return summary.to_string();
    }

    let mut stats = Builder::default();
    stats.push_record(["Key", "Title", "Critical", "Major", "Minor", "Total"]);
    for stat in &report.security_issue_stats {
        let counts = stat.occurrence;
        stats.push_record([
            stat.key.clone(),
            truncate_with_ellipsis(&stat.title, 50),
            counts.critical.to_string(),
            counts.major.to_string(),
            counts.minor.to_string(),
            counts.total.to_string(),
        ]);
    }
    let mut stats = stats.build();
    apply_table_style(&mut stats);

    format!("{}\n{}", summary, stats)
}
