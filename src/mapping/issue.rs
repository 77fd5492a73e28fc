use serde_json::Value;

use crate::client::extract::edge_nodes;
use crate::mapping::{MalformedNode, enum_field, opt_str, required_obj, required_str, string_list};
use crate::models::{Issue, IssueOccurrence, IssueSeverity};

const KIND: &str = "issue";

/// Map a `RepositoryIssue` node.
///
/// The node wraps the analyzer's issue definition under `issue` and lists
/// where it occurs under `occurrences`.
pub fn map_issue(node: &Value) -> Result<Issue, MalformedNode> {
    let id = required_str(node, KIND, "id")?;
    let definition = required_obj(node, KIND, "issue")?;

    let occurrences = node
        .get("occurrences")
        .filter(|v| !v.is_null())
        .map(|conn| edge_nodes(conn).into_iter().filter_map(map_occurrence).collect())
        .unwrap_or_default();

    Ok(Issue {
        id,
        shortcode: required_str(definition, KIND, "shortcode")?,
        title: required_str(definition, KIND, "title")?,
        category: opt_str(definition, "category").unwrap_or_else(|| "UNKNOWN".to_string()),
        severity: enum_field::<IssueSeverity>(definition, "severity").unwrap_or_default(),
        description: opt_str(definition, "description"),
        tags: string_list(definition, "tags"),
        occurrences,
    })
}

fn map_occurrence(node: &Value) -> Option<IssueOccurrence> {
    Some(IssueOccurrence {
        path: node.get("path")?.as_str()?.to_string(),
        begin_line: node.get("beginLine").and_then(Value::as_u64),
        end_line: node.get("endLine").and_then(Value::as_u64),
    })
}
