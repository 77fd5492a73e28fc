//! Metric settings mutations.
//!
//! Unlike reads, mutations never treat a failure as an absent result, and an
//! unknown project key is an error.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use super::extract::locate;
use super::{Absence, DeepSourceClient, DeepSourceError, DeepSourceResult, queries};
use crate::models::{MetricSettingUpdate, MetricShortcode, Project};

/// Input for [`DeepSourceClient::set_metric_threshold`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricThresholdParams {
    pub project_key: String,
    pub metric_shortcode: MetricShortcode,
    pub metric_key: String,
    /// `None` removes the threshold
    pub threshold_value: Option<f64>,
}

/// Input for [`DeepSourceClient::update_metric_setting`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSettingParams {
    pub project_key: String,
    pub metric_shortcode: MetricShortcode,
    pub is_reported: bool,
    pub is_threshold_enforced: bool,
}

impl DeepSourceClient {
    /// Set or clear the threshold of one metric item.
    pub async fn set_metric_threshold(
        &self,
        params: &MetricThresholdParams,
    ) -> DeepSourceResult<MetricSettingUpdate> {
        if params.metric_key.trim().is_empty() {
            return Err(DeepSourceError::InvalidInput {
                message: "metric key must not be empty".to_string(),
            });
        }
        if params.threshold_value.is_some_and(|v| !v.is_finite()) {
            return Err(DeepSourceError::InvalidInput {
                message: "threshold value must be a finite number".to_string(),
            });
        }

        let project = self.require_project(&params.project_key).await?;
        let input = json!({
            "repositoryId": project.repository.id,
            "metricShortcode": params.metric_shortcode,
            "metricKey": params.metric_key,
            "thresholdValue": params.threshold_value,
        });

        let update = self
            .mutate(
                queries::SET_METRIC_THRESHOLD,
                "setRepositoryMetricThreshold",
                input,
            )
            .await?;
        info!(
            project_key = %params.project_key,
            shortcode = %params.metric_shortcode,
            metric_key = %params.metric_key,
            ok = update.ok,
            "metric threshold updated"
        );
        Ok(update)
    }

    /// Change whether a metric is reported and whether its threshold is enforced.
    pub async fn update_metric_setting(
        &self,
        params: &MetricSettingParams,
    ) -> DeepSourceResult<MetricSettingUpdate> {
        let project = self.require_project(&params.project_key).await?;
        let input = json!({
            "repositoryId": project.repository.id,
            "metricShortcode": params.metric_shortcode,
            "isReported": params.is_reported,
            "isThresholdEnforced": params.is_threshold_enforced,
        });

        let update = self
            .mutate(
                queries::UPDATE_METRIC_SETTING,
                "updateRepositoryMetricSetting",
                input,
            )
            .await?;
        info!(
            project_key = %params.project_key,
            shortcode = %params.metric_shortcode,
            ok = update.ok,
            "metric setting updated"
        );
        Ok(update)
    }

    async fn require_project(&self, project_key: &str) -> DeepSourceResult<Project> {
        self.find_project(project_key)
            .await?
            .ok_or_else(|| DeepSourceError::ProjectNotFound {
                key: project_key.to_string(),
            })
    }

    async fn mutate(
        &self,
        query: &str,
        field: &str,
        input: Value,
    ) -> DeepSourceResult<MetricSettingUpdate> {
        let data = self
            .fetch(query, json!({ "input": input }), Absence::Reject)
            .await?
            .unwrap_or(Value::Null);
        let ok = locate(&data, &[field, "ok"])
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(MetricSettingUpdate { ok })
    }
}
