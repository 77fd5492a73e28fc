use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_optional, short_sha};
use crate::client::{
    DeepSourceClient, MetricHistoryParams, MetricSettingParams, MetricThresholdParams,
};
use crate::models::{
    MetricHistoryResponse, MetricHistoryValue, MetricSettingUpdate, MetricShortcode,
    RepositoryMetric,
};

#[derive(Tabled)]
pub(crate) struct MetricDisplay {
    #[tabled(rename = "Shortcode")]
    pub(crate) shortcode: String,
    #[tabled(rename = "Metric")]
    pub(crate) name: String,
    #[tabled(rename = "Key")]
    pub(crate) key: String,
    #[tabled(rename = "Value")]
    pub(crate) value: String,
    #[tabled(rename = "Threshold")]
    pub(crate) threshold: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
}

impl MetricDisplay {
    /// One row per metric item; a metric without items gets a single row.
    fn rows(metric: &RepositoryMetric) -> Vec<Self> {
        if metric.items.is_empty() {
            return vec![Self {
                shortcode: metric.shortcode.clone(),
                name: metric.name.clone(),
                key: "-".to_string(),
                value: "-".to_string(),
                threshold: "-".to_string(),
                status: "-".to_string(),
            }];
        }

        metric
            .items
            .iter()
            .map(|item| Self {
                shortcode: metric.shortcode.clone(),
                name: metric.name.clone(),
                key: item.key.clone(),
                value: item
                    .latest_value_display
                    .clone()
                    .unwrap_or_else(|| format_optional(item.latest_value)),
                threshold: format_optional(item.threshold),
                status: item.threshold_status.to_string(),
            })
            .collect()
    }
}

#[derive(Tabled)]
pub(crate) struct HistoryDisplay {
    #[tabled(rename = "Recorded")]
    pub(crate) created_at: String,
    #[tabled(rename = "Value")]
    pub(crate) value: String,
    #[tabled(rename = "Threshold")]
    pub(crate) threshold: String,
    #[tabled(rename = "Status")]
    pub(crate) status: String,
    #[tabled(rename = "Commit")]
    pub(crate) commit: String,
}

impl From<&MetricHistoryValue> for HistoryDisplay {
    fn from(value: &MetricHistoryValue) -> Self {
        Self {
            created_at: value.created_at.clone(),
            value: value
                .value_display
                .clone()
                .unwrap_or_else(|| value.value.to_string()),
            threshold: format_optional(value.threshold),
            status: value.threshold_status.to_string(),
            commit: value
                .commit_oid
                .as_deref()
                .map(short_sha)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// List quality metrics, optionally restricted to some shortcodes
pub async fn list_metrics(
    client: &DeepSourceClient,
    project_key: &str,
    shortcodes: &[MetricShortcode],
    format: &str,
) -> CliResult<String> {
    let metrics = client.get_quality_metrics(project_key, shortcodes).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&metrics)?),
        _ => Ok(format_metrics(&metrics)),
    }
}

pub(crate) fn format_metrics(metrics: &[RepositoryMetric]) -> String {
    if metrics.is_empty() {
        return "No metrics found.".to_string();
    }

    let rows: Vec<MetricDisplay> = metrics.iter().flat_map(MetricDisplay::rows).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// Show the recorded history of one metric item
pub async fn metric_history(
    client: &DeepSourceClient,
    params: &MetricHistoryParams,
    format: &str,
) -> CliResult<String> {
    let Some(history) = client.get_metric_history(params).await? else {
        return Ok(match format {
            "json" => "null".to_string(),
            _ => format!(
                "No history for {} ({}) in {}.",
                params.shortcode, params.metric_key, params.project_key
            ),
        });
    };

    match format {
        "json" => Ok(serde_json::to_string_pretty(&history)?),
        _ => Ok(format_history(&history)),
    }
}

pub(crate) fn format_history(history: &MetricHistoryResponse) -> String {
    let trend = if history.is_trending_positive {
        "trending positive"
    } else {
        "trending negative"
    };
    let header = format!(
        "{} ({} / {}): {}, {} is better",
        history.name,
        history.shortcode,
        history.metric_key,
        trend,
        history.positive_direction
    );

    if history.values.is_empty() {
        return format!("{}\nNo values recorded.", header);
    }

    let rows: Vec<HistoryDisplay> = history.values.iter().map(|v| v.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", header, table)
}

/// Set or clear a metric threshold
pub async fn set_threshold(
    client: &DeepSourceClient,
    params: &MetricThresholdParams,
) -> CliResult<String> {
    let update = client.set_metric_threshold(params).await?;
    let action = match params.threshold_value {
        Some(value) => format!("set to {}", value),
        None => "cleared".to_string(),
    };
    Ok(confirmation(
        update,
        &format!(
            "Threshold for {} ({}) {}",
            params.metric_shortcode, params.metric_key, action
        ),
    ))
}

/// Update whether a metric is reported and its threshold enforced
pub async fn update_setting(
    client: &DeepSourceClient,
    params: &MetricSettingParams,
) -> CliResult<String> {
    let update = client.update_metric_setting(params).await?;
    Ok(confirmation(
        update,
        &format!(
            "Settings for {} updated (reported: {}, threshold enforced: {})",
            params.metric_shortcode, params.is_reported, params.is_threshold_enforced
        ),
    ))
}

pub(crate) fn confirmation(update: MetricSettingUpdate, message: &str) -> String {
    if update.ok {
        format!("✓ {}", message)
    } else {
        format!("✗ DeepSource did not confirm the change: {}", message)
    }
}
