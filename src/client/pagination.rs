//! Pagination normalization.
//!
//! Callers may mix legacy offset pagination with Relay cursor pagination, and
//! may pass counts as strings, negatives or fractions. [`PaginationParams`]
//! coerces raw values while decoding, and [`PaginationParams::normalize`]
//! picks exactly one direction so the upstream never sees both `first` and
//! `last`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::serde_utils::{lenient_count, lenient_cursor};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination input, before or after normalization.
///
/// Decoding from JSON is lenient: counts accept numbers or numeric strings
/// (negative, invalid or non-numeric values become `0`, fractions are
/// floored), cursors accept any scalar and are stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub offset: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub first: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_cursor",
        skip_serializing_if = "Option::is_none"
    )]
    pub after: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_cursor",
        skip_serializing_if = "Option::is_none"
    )]
    pub before: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub last: Option<u32>,
}

impl PaginationParams {
    /// Forward page of `first` items after an optional cursor.
    pub fn forward(first: u32, after: Option<String>) -> Self {
        Self {
            first: Some(first),
            after,
            ..Self::default()
        }
    }

    /// Backward page of `last` items before `before`.
    pub fn backward(last: u32, before: impl Into<String>) -> Self {
        Self {
            last: Some(last),
            before: Some(before.into()),
            ..Self::default()
        }
    }

    /// Decode pagination parameters from an untyped value.
    ///
    /// A value that is not an object (or is `null`) yields the empty params.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::deserialize(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Resolve to a single pagination direction.
    ///
    /// 1. `first`/`last` are raised to at least 1 when provided.
    /// 2. A `before` cursor selects backward paging: `last = last ?? first ?? 10`.
    /// 3. `last` without `before` is honored but logged as non-standard.
    /// 4. Otherwise forward paging: `first = first ?? 10`.
    ///
    /// `offset` passes through untouched. The result is a fixed point:
    /// normalizing it again returns an equal value.
    pub fn normalize(&self) -> Self {
        let first = self.first.map(|n| n.max(1));
        let last = self.last.map(|n| n.max(1));
        let mut out = Self {
            offset: self.offset,
            first: None,
            after: self.after.clone(),
            before: self.before.clone(),
            last: None,
        };

        if out.before.is_some() {
            out.last = Some(last.or(first).unwrap_or(DEFAULT_PAGE_SIZE));
        } else if let Some(last) = last {
            warn!(
                last,
                "`last` without `before` is non-standard Relay pagination; serving it anyway"
            );
            out.last = Some(last);
        } else {
            out.first = Some(first.unwrap_or(DEFAULT_PAGE_SIZE));
        }

        out
    }

    /// Whether a cursor (`after` or `before`) is present.
    pub fn has_cursor(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Render as GraphQL variables.
    ///
    /// Cursor fields take precedence: `offset` is only sent when neither
    /// `after` nor `before` is set. Absent fields are sent as `null` so
    /// queries can declare them as nullable variables.
    pub fn to_variables(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        vars.insert("first".into(), json!(self.first));
        vars.insert("after".into(), json!(self.after));
        vars.insert("last".into(), json!(self.last));
        vars.insert("before".into(), json!(self.before));
        let offset = if self.has_cursor() { None } else { self.offset };
        vars.insert("offset".into(), json!(offset));
        vars
    }
}
