use crate::cli::commands::issue::*;
use crate::cli::commands::page_footer;
use crate::client::{PageInfo, PaginatedResponse, PaginationParams};
use crate::models::{Issue, IssueOccurrence, IssueSeverity};
use crate::test_support::{ok, spawn_test_server, viewer_projects};
use serde_json::json;

fn issue(occurrences: usize) -> Issue {
    Issue {
        id: "ri-1".to_string(),
        shortcode: "RS-W1000".to_string(),
        title: "Found redundant clone".to_string(),
        category: "PERFORMANCE".to_string(),
        severity: IssueSeverity::Minor,
        description: None,
        tags: vec![],
        occurrences: (0..occurrences)
            .map(|i| IssueOccurrence {
                path: "src/lib.rs".to_string(),
                begin_line: Some(10 + i as u64),
                end_line: None,
            })
            .collect(),
    }
}

#[test]
fn test_issue_display_location() {
    let display = IssueDisplay::from(&issue(3));
    assert_eq!(display.location, "src/lib.rs:10 (+2)");
    assert_eq!(display.severity, "MINOR");

    let display = IssueDisplay::from(&issue(0));
    assert_eq!(display.location, "-");
}

#[test]
fn test_page_footer_with_next_cursor() {
    let page = PaginatedResponse {
        items: vec![issue(1)],
        page_info: PageInfo {
            has_next_page: true,
            end_cursor: Some("YXJyYXk6MA==".to_string()),
            ..Default::default()
        },
        total_count: 12,
    };
    assert_eq!(
        page_footer(&page),
        "Showing 1 of 12 (next page: --after YXJyYXk6MA==)"
    );

    let last: PaginatedResponse<Issue> = PaginatedResponse::empty();
    assert_eq!(page_footer(&last), "Showing 0 of 0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_issues_missing_project() {
    let (client, _fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let output = list_issues(&client, "gh/acme/nope", &PaginationParams::default(), "table")
        .await
        .unwrap();
    assert_eq!(output, "No issues found.");

    let output = list_issues(&client, "gh/acme/nope", &PaginationParams::default(), "json")
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["totalCount"], 0);
    assert_eq!(parsed["items"], json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_issues_table() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "RepositoryIssues",
            json!({
                "repository": {
                    "issues": {
                        "totalCount": 1,
                        "edges": [{ "node": {
                            "id": "ri-1",
                            "issue": { "shortcode": "RS-W1000", "title": "Found redundant clone", "severity": "MINOR" }
                        }}]
                    }
                }
            }),
        ),
    ])
    .await;

    let output = list_issues(&client, "gh/acme/api", &PaginationParams::default(), "table")
        .await
        .unwrap();
    assert!(output.contains("RS-W1000"));
    assert!(output.contains("UNKNOWN"));
    assert!(output.ends_with("Showing 1 of 1"));
}
