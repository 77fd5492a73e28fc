use serde_json::Value;

use crate::mapping::{MalformedNode, count, enum_field, opt_str, required_str};
use crate::models::{
    AnalysisRun, AnalyzerDistribution, CategoryDistribution, RunRepository, RunStatus, RunSummary,
};

const KIND: &str = "run";

pub fn map_run(node: &Value) -> Result<AnalysisRun, MalformedNode> {
    let repository = node
        .get("repository")
        .filter(|v| v.is_object())
        .map(|repo| RunRepository {
            id: opt_str(repo, "id"),
            name: opt_str(repo, "name").unwrap_or_default(),
        })
        .unwrap_or_default();

    Ok(AnalysisRun {
        id: required_str(node, KIND, "id")?,
        run_uid: required_str(node, KIND, "runUid")?,
        commit_oid: required_str(node, KIND, "commitOid")?,
        branch_name: opt_str(node, "branchName"),
        base_oid: opt_str(node, "baseOid"),
        status: enum_field::<RunStatus>(node, "status").unwrap_or_default(),
        created_at: required_str(node, KIND, "createdAt")?,
        updated_at: opt_str(node, "updatedAt"),
        finished_at: opt_str(node, "finishedAt"),
        summary: node.get("summary").map(map_summary).unwrap_or_default(),
        repository,
    })
}

fn map_summary(summary: &Value) -> RunSummary {
    let entries = |field: &str| {
        summary
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter(|v| v.is_object()).collect::<Vec<_>>())
            .unwrap_or_default()
    };

    RunSummary {
        occurrences_introduced: count(summary, "occurrencesIntroduced"),
        occurrences_resolved: count(summary, "occurrencesResolved"),
        occurrences_suppressed: count(summary, "occurrencesSuppressed"),
        by_analyzer: entries("occurrenceDistributionByAnalyzer")
            .into_iter()
            .filter_map(|entry| {
                Some(AnalyzerDistribution {
                    analyzer_shortcode: opt_str(entry, "analyzerShortcode")?,
                    introduced: count(entry, "introduced"),
                })
            })
            .collect(),
        by_category: entries("occurrenceDistributionByCategory")
            .into_iter()
            .filter_map(|entry| {
                Some(CategoryDistribution {
                    category: opt_str(entry, "category")?,
                    introduced: count(entry, "introduced"),
                })
            })
            .collect(),
    }
}
