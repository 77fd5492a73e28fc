//! Validation of untyped GraphQL nodes into typed records.
//!
//! Every mapper is a total function `&Value -> Result<T, MalformedNode>`:
//! missing required scalars produce [`MalformedNode`], optional fields and
//! enums fall back to defaults. Batches go through [`validated`], which skips
//! malformed nodes instead of failing the whole page and stops after
//! [`MAX_ITERATIONS`] nodes.

use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::KnownValues;

mod issue;
mod metric;
mod project;
mod report;
mod run;
mod vulnerability;


pub use issue::map_issue;
pub use metric::{build_metric_history, is_trending_positive, map_history_value, map_metric};
pub use project::map_projects;
pub use report::map_report;
pub use run::map_run;
pub use vulnerability::map_vulnerability_occurrence;

/// Upper bound on nodes processed from a single connection.
pub const MAX_ITERATIONS: usize = 10_000;

/// A node that lacks data required to build its record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {kind} node: {reason}")]
pub struct MalformedNode {
    pub kind: &'static str,
    pub reason: String,
}

impl MalformedNode {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    pub fn missing(kind: &'static str, field: &str) -> Self {
        Self::new(kind, format!("missing required field `{}`", field))
    }
}

/// Whether `value` is one of `allowed`.
pub fn is_valid_enum(value: &str, allowed: &[&str]) -> bool {
    allowed.contains(&value)
}

/// Read an enum field, returning `None` when it is absent or not a known value.
pub fn enum_field<E>(node: &Value, field: &str) -> Option<E>
where
    E: KnownValues + FromStr,
{
    let raw = node.get(field)?.as_str()?;
    if !is_valid_enum(raw, E::VALUES) {
        debug!(field, value = raw, "unknown enum value, using default");
        return None;
    }
    raw.parse().ok()
}

/// Required string field.
pub fn required_str(
    node: &Value,
    kind: &'static str,
    field: &str,
) -> Result<String, MalformedNode> {
    node.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| MalformedNode::missing(kind, field))
}

/// Required object field.
pub fn required_obj<'a>(
    node: &'a Value,
    kind: &'static str,
    field: &str,
) -> Result<&'a Value, MalformedNode> {
    node.get(field)
        .filter(|v| v.is_object())
        .ok_or_else(|| MalformedNode::missing(kind, field))
}

pub fn opt_str(node: &Value, field: &str) -> Option<String> {
    node.get(field).and_then(Value::as_str).map(str::to_string)
}

pub fn opt_f64(node: &Value, field: &str) -> Option<f64> {
    node.get(field).and_then(Value::as_f64)
}

pub fn count(node: &Value, field: &str) -> u64 {
    node.get(field).and_then(Value::as_u64).unwrap_or(0)
}

pub fn flag(node: &Value, field: &str) -> bool {
    node.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// String array field; non-string entries are dropped.
pub fn string_list(node: &Value, field: &str) -> Vec<String> {
    node.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Iterator that maps nodes, skipping malformed ones, up to [`MAX_ITERATIONS`].
pub struct Validated<I, F> {
    nodes: I,
    map: F,
    seen: usize,
    skipped: usize,
    capped: bool,
}

impl<I, F> Validated<I, F> {
    /// Number of nodes skipped as malformed so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Map `nodes` with `map`, skipping (and logging) any node it rejects.
pub fn validated<'a, I, F, T>(nodes: I, map: F) -> Validated<I::IntoIter, F>
where
    I: IntoIterator<Item = &'a Value>,
    F: FnMut(&Value) -> Result<T, MalformedNode>,
{
    Validated {
        nodes: nodes.into_iter(),
        map,
        seen: 0,
        skipped: 0,
        capped: false,
    }
}

impl<'a, I, F, T> Iterator for Validated<I, F>
where
    I: Iterator<Item = &'a Value>,
    F: FnMut(&Value) -> Result<T, MalformedNode>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if self.capped {
                return None;
            }
            let node = self.nodes.next()?;
            if self.seen >= MAX_ITERATIONS {
                self.capped = true;
                warn!(
                    limit = MAX_ITERATIONS,
                    skipped = self.skipped,
                    "node iteration limit reached, remaining nodes ignored"
                );
                return None;
            }
            self.seen += 1;
            match (self.map)(node) {
                Ok(item) => return Some(item),
                Err(err) => {
                    self.skipped += 1;
                    warn!(error = %err, "skipping malformed node");
                }
            }
        }
    }
}
