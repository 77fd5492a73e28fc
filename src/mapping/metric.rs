use serde_json::Value;
use tracing::{debug, warn};

use crate::client::extract::{edge_nodes, locate};
use crate::mapping::{MalformedNode, enum_field, flag, opt_f64, opt_str, required_str, validated};
use crate::models::{
    MetricDirection, MetricHistoryResponse, MetricHistoryValue, MetricItem,
    MetricThresholdStatus, RepositoryMetric,
};

const KIND: &str = "metric";

pub fn map_metric(node: &Value) -> Result<RepositoryMetric, MalformedNode> {
    let items = node
        .get("items")
        .and_then(Value::as_array)
        .map(|items| validated(items, map_item).collect())
        .unwrap_or_default();

    Ok(RepositoryMetric {
        name: required_str(node, KIND, "name")?,
        shortcode: required_str(node, KIND, "shortcode")?,
        description: opt_str(node, "description"),
        positive_direction: enum_field::<MetricDirection>(node, "positiveDirection")
            .unwrap_or_default(),
        unit: opt_str(node, "unit"),
        min_value_allowed: opt_f64(node, "minValueAllowed"),
        max_value_allowed: opt_f64(node, "maxValueAllowed"),
        is_reported: flag(node, "isReported"),
        is_threshold_enforced: flag(node, "isThresholdEnforced"),
        items,
    })
}

fn map_item(node: &Value) -> Result<MetricItem, MalformedNode> {
    Ok(MetricItem {
        id: required_str(node, "metric item", "id")?,
        key: required_str(node, "metric item", "key")?,
        threshold: opt_f64(node, "threshold"),
        latest_value: opt_f64(node, "latestValue"),
        latest_value_display: opt_str(node, "latestValueDisplay"),
        threshold_status: enum_field::<MetricThresholdStatus>(node, "thresholdStatus")
            .unwrap_or_default(),
    })
}

pub fn map_history_value(node: &Value) -> Result<MetricHistoryValue, MalformedNode> {
    let value = opt_f64(node, "value")
        .ok_or_else(|| MalformedNode::missing("metric value", "value"))?;

    Ok(MetricHistoryValue {
        value,
        value_display: opt_str(node, "valueDisplay"),
        threshold: opt_f64(node, "threshold"),
        threshold_status: enum_field::<MetricThresholdStatus>(node, "thresholdStatus")
            .unwrap_or_default(),
        commit_oid: opt_str(node, "commitOid"),
        created_at: required_str(node, "metric value", "createdAt")?,
    })
}

/// Whether the series moved in the metric's positive direction.
///
/// Compares the first and last values only; a series with fewer than two
/// values has no trend and counts as positive.
pub fn is_trending_positive(values: &[MetricHistoryValue], direction: MetricDirection) -> bool {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if values.len() >= 2 => {
            direction.is_improvement(first.value, last.value)
        }
        _ => true,
    }
}

/// Assemble the history of `shortcode`/`metric_key` from a metrics response.
///
/// Expects `repository.metrics[]`, each with `items[]` holding a `values`
/// connection. Returns `None` when the metric or the key is not present.
pub fn build_metric_history(
    data: &Value,
    shortcode: &str,
    metric_key: &str,
) -> Option<MetricHistoryResponse> {
    let metrics = locate(data, &["repository", "metrics"])?.as_array()?;
    let metric = metrics
        .iter()
        .find(|m| m.get("shortcode").and_then(Value::as_str) == Some(shortcode))?;
    let item = metric
        .get("items")
        .and_then(Value::as_array)?
        .iter()
        .find(|i| i.get("key").and_then(Value::as_str) == Some(metric_key));

    let Some(item) = item else {
        debug!(shortcode, metric_key, "metric has no item for key");
        return None;
    };

    let name = match required_str(metric, KIND, "name") {
        Ok(name) => name,
        Err(err) => {
            warn!(error = %err, "cannot build metric history");
            return None;
        }
    };

    let mut values: Vec<MetricHistoryValue> = item
        .get("values")
        .filter(|v| !v.is_null())
        .map(|conn| validated(edge_nodes(conn), map_history_value).collect())
        .unwrap_or_default();
    // ISO-8601 timestamps order lexicographically
    values.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let positive_direction =
        enum_field::<MetricDirection>(metric, "positiveDirection").unwrap_or_default();

    Some(MetricHistoryResponse {
        shortcode: shortcode.to_string(),
        metric_key: metric_key.to_string(),
        name,
        unit: opt_str(metric, "unit"),
        positive_direction,
        threshold: opt_f64(item, "threshold"),
        is_threshold_enforced: flag(metric, "isThresholdEnforced"),
        is_trending_positive: is_trending_positive(&values, positive_direction),
        values,
    })
}
