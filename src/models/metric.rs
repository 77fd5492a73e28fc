use serde::{Deserialize, Serialize};

use crate::models::KnownValues;

graphql_enum! {
    /// Built-in quality metrics.
    pub enum MetricShortcode {
        /// Line coverage
        Lcv => "LCV",
        /// Branch coverage
        Bcv => "BCV",
        /// Documentation coverage
        Dcv => "DCV",
        /// Duplicate code percentage
        Ddp => "DDP",
        /// Statement coverage
        Scv => "SCV",
        /// Total coverage
        Tcv => "TCV",
        /// Code complexity
        Cmp => "CMP",
    }
}

graphql_enum! {
    /// Whether a metric value meets its threshold.
    #[derive(Default)]
    pub enum MetricThresholdStatus {
        Passing => "PASSING",
        Failing => "FAILING",
        #[default]
        Unknown => "UNKNOWN",
    }
}

/// Which way a metric should move to count as an improvement.
///
/// The upstream reports `UPWARD`/`DOWNWARD`; `HIGHER_IS_BETTER` and
/// `LOWER_IS_BETTER` are accepted as synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MetricDirection {
    #[default]
    #[serde(rename = "UPWARD", alias = "HIGHER_IS_BETTER")]
    Upward,
    #[serde(rename = "DOWNWARD", alias = "LOWER_IS_BETTER")]
    Downward,
}

impl MetricDirection {
    /// Whether moving from `first` to `last` is an improvement (or no change).
    pub fn is_improvement(&self, first: f64, last: f64) -> bool {
        match self {
            MetricDirection::Upward => last >= first,
            MetricDirection::Downward => last <= first,
        }
    }
}

impl std::fmt::Display for MetricDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricDirection::Upward => write!(f, "UPWARD"),
            MetricDirection::Downward => write!(f, "DOWNWARD"),
        }
    }
}

impl std::str::FromStr for MetricDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPWARD" | "HIGHER_IS_BETTER" => Ok(MetricDirection::Upward),
            "DOWNWARD" | "LOWER_IS_BETTER" => Ok(MetricDirection::Downward),
            _ => Err(format!("Invalid MetricDirection: {}", s)),
        }
    }
}

impl KnownValues for MetricDirection {
    const VALUES: &'static [&'static str] =
        &["UPWARD", "DOWNWARD", "HIGHER_IS_BETTER", "LOWER_IS_BETTER"];
}

/// A quality metric and its per-language items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryMetric {
    pub name: String,
    pub shortcode: String,
    pub description: Option<String>,
    pub positive_direction: MetricDirection,
    pub unit: Option<String>,
    pub min_value_allowed: Option<f64>,
    pub max_value_allowed: Option<f64>,
    pub is_reported: bool,
    pub is_threshold_enforced: bool,
    pub items: Vec<MetricItem>,
}

/// A metric measured for one key (a language, or `AGGREGATE`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricItem {
    pub id: String,
    pub key: String,
    pub threshold: Option<f64>,
    pub latest_value: Option<f64>,
    pub latest_value_display: Option<String>,
    pub threshold_status: MetricThresholdStatus,
}

/// One recorded metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHistoryValue {
    pub value: f64,
    pub value_display: Option<String>,
    pub threshold: Option<f64>,
    pub threshold_status: MetricThresholdStatus,
    pub commit_oid: Option<String>,
    pub created_at: String,
}

/// History of one metric item, oldest value first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricHistoryResponse {
    pub shortcode: String,
    pub metric_key: String,
    pub name: String,
    pub unit: Option<String>,
    pub positive_direction: MetricDirection,
    pub threshold: Option<f64>,
    pub is_threshold_enforced: bool,
    pub values: Vec<MetricHistoryValue>,
    pub is_trending_positive: bool,
}

/// Outcome of a metric settings mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSettingUpdate {
    pub ok: bool,
}
