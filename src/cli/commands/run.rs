use tabled::Tabled;
use tabled::builder::Builder;

use crate::cli::commands::render_page;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_optional, short_sha};
use crate::client::{DeepSourceClient, PaginationParams};
use crate::models::AnalysisRun;

#[derive(Tabled)]
pub(crate) struct RunDisplay {
    #[tabled(rename = "Run UID")]
    pub(crate) run_uid: String,
    #[tabled(rename = "Commit")]
    pub(crate) commit: String,
    #[tabled(rename = "Branch")]
    pub(crate) branch: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
    #[tabled(rename = "Introduced")]
    pub(crate) introduced: u64,
    #[tabled(rename = "Resolved")]
    pub(crate) resolved: u64,
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

impl From<&AnalysisRun> for RunDisplay {
    fn from(run: &AnalysisRun) -> Self {
        Self {
            run_uid: run.run_uid.clone(),
            commit: short_sha(&run.commit_oid),
            branch: format_optional(run.branch_name.as_deref()),
            status: run.status.to_string(),
            introduced: run.summary.occurrences_introduced,
            resolved: run.summary.occurrences_resolved,
            created_at: run.created_at.clone(),
        }
    }
}

/// List analysis runs, most recent first
pub async fn list_runs(
    client: &DeepSourceClient,
    project_key: &str,
    page: &PaginationParams,
    format: &str,
) -> CliResult<String> {
    let runs = client.list_runs(project_key, page).await?;
    render_page::<_, RunDisplay>(&runs, format, "No analysis runs found.")
}

/// Show a single run by run UID or commit SHA
pub async fn get_run(
    client: &DeepSourceClient,
    identifier: &str,
    format: &str,
) -> CliResult<String> {
    let Some(run) = client.get_run(identifier).await? else {
        return Ok(match format {
            "json" => "null".to_string(),
            _ => format!("No run found for {}.", identifier),
        });
    };

    match format {
        "json" => Ok(serde_json::to_string_pretty(&run)?),
        _ => Ok(format_run(&run)),
    }
}

pub(crate) fn format_run(run: &AnalysisRun) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["Run UID", &run.run_uid]);
    builder.push_record(["Commit", &run.commit_oid]);
    builder.push_record(["Branch", &format_optional(run.branch_name.as_deref())]);
    builder.push_record(["Status", &run.status.to_string()]);
    if !run.repository.name.is_empty() {
        builder.push_record(["Repository", &run.repository.name]);
    }
    builder.push_record(["Created", &run.created_at]);
    builder.push_record(["Finished", &format_optional(run.finished_at.as_deref())]);

    let summary = &run.summary;
    builder.push_record(["Introduced", &summary.occurrences_introduced.to_string()]);
    builder.push_record(["Resolved", &summary.occurrences_resolved.to_string()]);
    builder.push_record(["Suppressed", &summary.occurrences_suppressed.to_string()]);
    for entry in &summary.by_analyzer {
        builder.push_record([
            format!("Analyzer {}", entry.analyzer_shortcode),
            entry.introduced.to_string(),
        ]);
    }
    for entry in &summary.by_category {
        builder.push_record([
            format!("Category {}", entry.category),
            entry.introduced.to_string(),
        ]);
    }

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
