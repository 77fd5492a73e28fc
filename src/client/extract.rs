//! Defensive extraction of GraphQL connections.
//!
//! The upstream regularly returns partial nulls. Extraction never fails:
//! a missing intermediate object yields the canonical empty page, a null
//! edge node is dropped, and a node the mapper rejects is logged and skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mapping::{MalformedNode, validated};

/// Relay page metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Read page info from a `pageInfo` object, defaulting each field.
    pub fn from_value(value: Option<&Value>) -> Self {
        let flag = |name: &str| {
            value
                .and_then(|v| v.get(name))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };
        let cursor = |name: &str| {
            value
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            has_next_page: flag("hasNextPage"),
            has_previous_page: flag("hasPreviousPage"),
            start_cursor: cursor("startCursor"),
            end_cursor: cursor("endCursor"),
        }
    }
}

/// One page of typed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

impl<T> PaginatedResponse<T> {
    /// The canonical empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Untyped view of a connection: its non-null nodes plus page metadata.
#[derive(Debug)]
pub struct RawConnection<'a> {
    pub nodes: Vec<&'a Value>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

/// Walk `path` from `root`, stopping at the first missing or null object.
pub fn locate<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, key| current.get(*key))
        .filter(|v| !v.is_null())
}

/// Non-null nodes of a connection, in order.
///
/// Accepts both the Relay shape (`edges[].node`) and the legacy shape
/// (`nodes[]`). Edges take precedence when both are present.
pub fn edge_nodes(connection: &Value) -> Vec<&Value> {
    if let Some(edges) = connection.get("edges").and_then(Value::as_array) {
        return edges
            .iter()
            .filter_map(|edge| edge.get("node"))
            .filter(|node| !node.is_null())
            .collect();
    }
    connection
        .get("nodes")
        .and_then(Value::as_array)
        .map(|nodes| nodes.iter().filter(|node| !node.is_null()).collect())
        .unwrap_or_default()
}

/// Read the connection found at `path`, if every level exists.
pub fn raw_connection<'a>(root: &'a Value, path: &[&str]) -> Option<RawConnection<'a>> {
    let connection = locate(root, path)?;
    Some(RawConnection {
        nodes: edge_nodes(connection),
        page_info: PageInfo::from_value(connection.get("pageInfo")),
        total_count: connection
            .get("totalCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}

/// Extract the connection at `path` into a typed page.
///
/// `path` is relative to the response `data` object, e.g.
/// `["repository", "issues"]`.
pub fn extract<T, F>(data: &Value, path: &[&str], map: F) -> PaginatedResponse<T>
where
    F: FnMut(&Value) -> Result<T, MalformedNode>,
{
    match raw_connection(data, path) {
        Some(connection) => PaginatedResponse {
            items: validated(connection.nodes, map).collect(),
            page_info: connection.page_info,
            total_count: connection.total_count,
        },
        None => PaginatedResponse::empty(),
    }
}
