//! Repository-scoped read operations.
//!
//! Each operation resolves the project key first; an unknown key is a normal
//! outcome and yields the empty result for that operation.

use serde_json::{Value, json};
use tracing::debug;

use super::extract::{PaginatedResponse, extract, locate};
use super::pagination::PaginationParams;
use super::{
    Absence, DeepSourceClient, DeepSourceError, DeepSourceResult, queries, repository_variables,
};
use crate::mapping::{
    build_metric_history, map_issue, map_metric, map_report, map_run,
    map_vulnerability_occurrence, validated,
};
use crate::models::{
    AnalysisRun, ComplianceReport, Issue, MetricHistoryResponse, MetricShortcode, Project,
    ReportType, RepositoryMetric, VulnerabilityOccurrence,
};

/// Number of history values requested when the caller gives no limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// Input for [`DeepSourceClient::get_metric_history`].
#[derive(Debug, Clone)]
pub struct MetricHistoryParams {
    pub project_key: String,
    pub shortcode: MetricShortcode,
    /// Metric key such as `AGGREGATE` or a language name
    pub metric_key: String,
    pub limit: Option<u32>,
}

impl MetricHistoryParams {
    pub fn new(project_key: impl Into<String>, shortcode: MetricShortcode) -> Self {
        Self {
            project_key: project_key.into(),
            shortcode,
            metric_key: "AGGREGATE".to_string(),
            limit: None,
        }
    }

    pub fn with_metric_key(mut self, metric_key: impl Into<String>) -> Self {
        self.metric_key = metric_key.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl DeepSourceClient {
    /// Fetch a page of a repository connection.
    async fn repository_page<T, F>(
        &self,
        project: &Project,
        query: &str,
        field: &str,
        page: &PaginationParams,
        map: F,
    ) -> DeepSourceResult<PaginatedResponse<T>>
    where
        F: FnMut(&Value) -> Result<T, crate::mapping::MalformedNode>,
    {
        let page = page.normalize();
        let mut vars = repository_variables(project);
        vars.extend(page.to_variables());

        let data = self
            .fetch(query, Value::Object(vars), Absence::TolerateNull)
            .await?;
        Ok(data
            .map(|data| extract(&data, &["repository", field], map))
            .unwrap_or_default())
    }

    /// Issues on the project's default branch.
    pub async fn get_issues(
        &self,
        project_key: &str,
        page: &PaginationParams,
    ) -> DeepSourceResult<PaginatedResponse<Issue>> {
        let Some(project) = self.find_project(project_key).await? else {
            return Ok(PaginatedResponse::empty());
        };
        self.repository_page(&project, queries::REPOSITORY_ISSUES, "issues", page, map_issue)
            .await
    }

    /// Analysis runs, most recent first.
    pub async fn list_runs(
        &self,
        project_key: &str,
        page: &PaginationParams,
    ) -> DeepSourceResult<PaginatedResponse<AnalysisRun>> {
        let Some(project) = self.find_project(project_key).await? else {
            return Ok(PaginatedResponse::empty());
        };
        let query = format!("{}{}", queries::REPOSITORY_RUNS, queries::RUN_FIELDS);
        self.repository_page(&project, &query, "analysisRuns", page, map_run)
            .await
    }

    /// A single run by run UID or by commit SHA.
    ///
    /// A 40-character hexadecimal identifier is treated as a commit OID.
    pub async fn get_run(&self, identifier: &str) -> DeepSourceResult<Option<AnalysisRun>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(DeepSourceError::InvalidInput {
                message: "run identifier must not be empty".to_string(),
            });
        }

        let variables = if is_commit_oid(identifier) {
            json!({ "runUid": null, "commitOid": identifier })
        } else {
            json!({ "runUid": identifier, "commitOid": null })
        };
        let query = format!("{}{}", queries::RUN_BY_IDENTIFIER, queries::RUN_FIELDS);

        let Some(data) = self
            .fetch(&query, variables, Absence::TolerateMissing)
            .await?
        else {
            return Ok(None);
        };
        let Some(node) = locate(&data, &["run"]) else {
            return Ok(None);
        };
        Ok(validated([node], map_run).next())
    }

    /// Dependency vulnerabilities found in the project.
    pub async fn get_dependency_vulnerabilities(
        &self,
        project_key: &str,
        page: &PaginationParams,
    ) -> DeepSourceResult<PaginatedResponse<VulnerabilityOccurrence>> {
        let Some(project) = self.find_project(project_key).await? else {
            return Ok(PaginatedResponse::empty());
        };
        self.repository_page(
            &project,
            queries::DEPENDENCY_VULNERABILITIES,
            "dependencyVulnerabilityOccurrences",
            page,
            map_vulnerability_occurrence,
        )
        .await
    }

    /// Quality metrics, optionally restricted to some shortcodes.
    pub async fn get_quality_metrics(
        &self,
        project_key: &str,
        shortcodes: &[MetricShortcode],
    ) -> DeepSourceResult<Vec<RepositoryMetric>> {
        let Some(project) = self.find_project(project_key).await? else {
            return Ok(Vec::new());
        };

        let mut vars = repository_variables(&project);
        let filter = (!shortcodes.is_empty()).then_some(shortcodes);
        vars.insert("shortcodeIn".into(), json!(filter));

        let Some(data) = self
            .fetch(queries::QUALITY_METRICS, Value::Object(vars), Absence::TolerateNull)
            .await?
        else {
            return Ok(Vec::new());
        };
        Ok(locate(&data, &["repository", "metrics"])
            .and_then(Value::as_array)
            .map(|metrics| validated(metrics, map_metric).collect())
            .unwrap_or_default())
    }

    /// History of one metric item, with its trend.
    ///
    /// Returns `None` when the project, metric or key does not exist.
    pub async fn get_metric_history(
        &self,
        params: &MetricHistoryParams,
    ) -> DeepSourceResult<Option<MetricHistoryResponse>> {
        let Some(project) = self.find_project(&params.project_key).await? else {
            return Ok(None);
        };

        let shortcode = params.shortcode.as_str();
        let mut vars = repository_variables(&project);
        vars.insert("shortcodeIn".into(), json!([shortcode]));
        vars.insert(
            "limit".into(),
            json!(params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).max(1)),
        );

        let Some(data) = self
            .fetch(queries::METRIC_HISTORY, Value::Object(vars), Absence::TolerateMissing)
            .await?
        else {
            return Ok(None);
        };
        let history = build_metric_history(&data, shortcode, &params.metric_key);
        if history.is_none() {
            debug!(shortcode, metric_key = %params.metric_key, "no history for metric");
        }
        Ok(history)
    }

    /// A compliance report for the project.
    pub async fn get_compliance_report(
        &self,
        project_key: &str,
        report_type: ReportType,
    ) -> DeepSourceResult<Option<ComplianceReport>> {
        let Some(project) = self.find_project(project_key).await? else {
            return Ok(None);
        };

        let vars = repository_variables(&project);
        let Some(data) = self
            .fetch(queries::COMPLIANCE_REPORT, Value::Object(vars), Absence::TolerateMissing)
            .await?
        else {
            return Ok(None);
        };
        let Some(node) = locate(&data, &["repository", "reports", report_type.field_name()]) else {
            return Ok(None);
        };
        Ok(validated([node], |n| map_report(report_type, n)).next())
    }
}

fn is_commit_oid(identifier: &str) -> bool {
    identifier.len() == 40 && identifier.chars().all(|c| c.is_ascii_hexdigit())
}
