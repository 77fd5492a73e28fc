use crate::client::*;
use crate::models::{
    IssueSeverity, MetricDirection, MetricShortcode, ReportStatus, ReportType, RunStatus,
    VulnerabilityReachability,
};
use crate::test_support::{errors, ok, spawn_test_server, viewer_projects};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

fn metric_history(direction: &str) -> (&'static str, StatusCode, Value) {
    let value = |id: &str, v: f64, at: &str| {
        json!({ "node": {
            "id": id,
            "value": v,
            "valueDisplay": format!("{}%", v),
            "thresholdStatus": "PASSING",
            "commitOid": "abc",
            "createdAt": at
        }})
    };
    ok(
        "MetricHistory",
        json!({
            "repository": {
                "name": "api",
                "metrics": [{
                    "name": "Line Coverage",
                    "shortcode": "LCV",
                    "positiveDirection": direction,
                    "unit": "%",
                    "isThresholdEnforced": true,
                    "items": [{
                        "id": "item-1",
                        "key": "AGGREGATE",
                        "threshold": 80.0,
                        "values": {
                            "edges": [
                                value("v2", 75.0, "2024-02-01T00:00:00Z"),
                                value("v1", 70.0, "2024-01-01T00:00:00Z"),
                                value("v3", 82.0, "2024-03-01T00:00:00Z")
                            ]
                        }
                    }]
                }]
            }
        }),
    )
}

#[test]
fn test_empty_api_key_is_rejected() {
    let result = DeepSourceClient::new(ClientConfig::new("  "));
    assert!(matches!(result, Err(DeepSourceError::Config { .. })));
}

#[test]
fn test_endpoint_uses_configured_url() {
    let client =
        DeepSourceClient::new(ClientConfig::new("k").with_base_url("http://localhost:9/graphql/"))
            .unwrap();
    assert_eq!(client.endpoint(), "http://localhost:9/graphql/");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects() {
    let (client, fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let projects = client.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].key, "gh/acme/api");
    assert_eq!(projects[0].repository.login, "acme");
    assert_eq!(projects[0].repository.default_branch.as_deref(), Some("main"));

    let requests = fixture.requests();
    assert_eq!(requests.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_issues_missing_project_is_empty_page() {
    let (client, fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let page = client
        .get_issues("missing-project", &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page, PaginatedResponse::empty());
    // only the project lookup went out
    assert_eq!(fixture.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_issues() {
    let (client, fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "RepositoryIssues",
            json!({
                "repository": {
                    "name": "api",
                    "issues": {
                        "totalCount": 2,
                        "pageInfo": { "hasNextPage": true, "hasPreviousPage": false, "endCursor": "YXJyYXk6MQ==" },
                        "edges": [
                            { "node": {
                                "id": "ri-1",
                                "issue": {
                                    "shortcode": "PYL-W0612",
                                    "title": "Unused variable found",
                                    "category": "ANTI_PATTERN",
                                    "severity": "MAJOR",
                                    "tags": ["unused"]
                                },
                                "occurrences": { "edges": [
                                    { "node": { "path": "src/app.py", "beginLine": 10, "endLine": 10 } }
                                ]}
                            }},
                            { "node": null }
                        ]
                    }
                }
            }),
        ),
    ])
    .await;

    let page = client
        .get_issues("gh/acme/api", &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_count, 2);
    assert!(page.page_info.has_next_page);

    let issue = &page.items[0];
    assert_eq!(issue.shortcode, "PYL-W0612");
    assert_eq!(issue.severity, IssueSeverity::Major);
    assert_eq!(issue.occurrences[0].path, "src/app.py");

    let vars = fixture.variables_of("RepositoryIssues");
    assert_eq!(vars["login"], "acme");
    assert_eq!(vars["name"], "api");
    assert_eq!(vars["provider"], "GITHUB");
    assert_eq!(vars["first"], 10);
    assert_eq!(vars["last"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backward_pagination_variables() {
    let (client, fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let page = PaginationParams {
        first: Some(25),
        before: Some("cursor-50".to_string()),
        offset: Some(40),
        ..Default::default()
    };
    client.get_issues("gh/acme/api", &page).await.unwrap();

    let vars = fixture.variables_of("RepositoryIssues");
    assert_eq!(vars["first"], Value::Null);
    assert_eq!(vars["last"], 25);
    assert_eq!(vars["before"], "cursor-50");
    assert_eq!(vars["offset"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_none_type_error_is_empty_page() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        errors(
            "DependencyVulnerabilities",
            &["'NoneType' object has no attribute 'get'"],
        ),
    ])
    .await;

    let page = client
        .get_dependency_vulnerabilities("gh/acme/api", &PaginationParams::default())
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_count, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_multiple_graphql_errors() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        errors("RepositoryRuns", &["Error 1", "Error 2"]),
    ])
    .await;

    let err = client
        .list_runs("gh/acme/api", &PaginationParams::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "GraphQL Errors: Error 1, Error 2");
    assert_eq!(err.category(), ErrorCategory::Graphql);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized() {
    let (client, _fixture, _handle) = spawn_test_server(vec![(
        "ViewerProjects",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Invalid token" }),
    )])
    .await;

    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, DeepSourceError::Authentication));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rate_limited() {
    let (client, _fixture, _handle) = spawn_test_server(vec![(
        "ViewerProjects",
        StatusCode::TOO_MANY_REQUESTS,
        json!({}),
    )])
    .await;

    let err = client.list_projects().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::RateLimit);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_refused() {
    // bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new("k").with_base_url(format!("http://{}/graphql/", addr));
    let client = DeepSourceClient::new(config).unwrap();
    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, DeepSourceError::Connection));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_body_is_empty_result() {
    let (client, _fixture, _handle) =
        spawn_test_server(vec![("ViewerProjects", StatusCode::OK, json!({}))]).await;

    let projects = client.list_projects().await.unwrap();
    assert!(projects.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_runs() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "RepositoryRuns",
            json!({
                "repository": {
                    "analysisRuns": {
                        "totalCount": 1,
                        "edges": [{ "node": {
                            "id": "run-node",
                            "runUid": "4b1c6a8e-0000-4000-8000-000000000001",
                            "commitOid": "0123456789abcdef0123456789abcdef01234567",
                            "branchName": "main",
                            "status": "SUCCESS",
                            "createdAt": "2024-03-01T10:00:00Z",
                            "summary": {
                                "occurrencesIntroduced": 3,
                                "occurrencesResolved": 1,
                                "occurrenceDistributionByAnalyzer": [
                                    { "analyzerShortcode": "python", "introduced": 3 }
                                ]
                            },
                            "repository": { "id": "UmVwb3NpdG9yeTox", "name": "api" }
                        }}]
                    }
                }
            }),
        ),
    ])
    .await;

    let page = client
        .list_runs("gh/acme/api", &PaginationParams::forward(5, None))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    let run = &page.items[0];
    assert_eq!(run.status, RunStatus::Success);
    assert_eq!(run.summary.occurrences_introduced, 3);
    assert_eq!(run.summary.by_analyzer[0].analyzer_shortcode, "python");
    assert_eq!(run.repository.name, "api");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_run_not_found_is_none() {
    let (client, fixture, _handle) = spawn_test_server(vec![errors(
        "RunByIdentifier",
        &["Run matching query does not exist / not found"],
    )])
    .await;

    let run = client
        .get_run("4b1c6a8e-0000-4000-8000-000000000001")
        .await
        .unwrap();
    assert!(run.is_none());

    let vars = fixture.variables_of("RunByIdentifier");
    assert_eq!(vars["runUid"], "4b1c6a8e-0000-4000-8000-000000000001");
    assert_eq!(vars["commitOid"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_run_http_404_is_an_error() {
    let (client, _fixture, _handle) = spawn_test_server(vec![(
        "RunByIdentifier",
        StatusCode::NOT_FOUND,
        json!("Not Found"),
    )])
    .await;

    let err = client.get_run("run-1").await.unwrap_err();
    assert!(matches!(err, DeepSourceError::Api { .. }));
    assert!(err.to_string().starts_with("DeepSource API error: HTTP 404"));
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_run_by_commit_oid() {
    let (client, fixture, _handle) = spawn_test_server(vec![ok(
        "RunByIdentifier",
        json!({
            "run": {
                "id": "run-node",
                "runUid": "uid-1",
                "commitOid": "0123456789abcdef0123456789abcdef01234567",
                "status": "NOT_A_STATUS",
                "createdAt": "2024-03-01T10:00:00Z"
            }
        }),
    )])
    .await;

    let run = client
        .get_run("0123456789abcdef0123456789abcdef01234567")
        .await
        .unwrap()
        .expect("run should be found");
    assert_eq!(run.run_uid, "uid-1");
    assert_eq!(run.status, RunStatus::Unknown);

    let vars = fixture.variables_of("RunByIdentifier");
    assert_eq!(vars["runUid"], Value::Null);
    assert_eq!(vars["commitOid"], "0123456789abcdef0123456789abcdef01234567");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_run_rejects_blank_identifier() {
    let (client, _fixture, _handle) = spawn_test_server(vec![]).await;
    let err = client.get_run("   ").await.unwrap_err();
    assert!(matches!(err, DeepSourceError::InvalidInput { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dependency_vulnerabilities() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "DependencyVulnerabilities",
            json!({
                "repository": {
                    "dependencyVulnerabilityOccurrences": {
                        "totalCount": 2,
                        "edges": [
                            { "node": {
                                "id": "occ-1",
                                "reachability": "REACHABLE",
                                "fixability": "AUTO_FIXABLE",
                                "package": { "id": "pkg-1", "ecosystem": "PyPI", "name": "requests" },
                                "packageVersion": { "id": "pv-1", "version": "2.19.0", "versionType": "SEMVER" },
                                "vulnerability": {
                                    "id": "vuln-1",
                                    "identifier": "GHSA-x84v-xcm2-53pg",
                                    "severity": "HIGH",
                                    "cvssV3BaseScore": 7.5
                                }
                            }},
                            { "node": {
                                "id": "occ-2",
                                "package": { "id": "pkg-2", "ecosystem": "npm", "name": "lodash" }
                            }}
                        ]
                    }
                }
            }),
        ),
    ])
    .await;

    let page = client
        .get_dependency_vulnerabilities("gh/acme/api", &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].reachability, VulnerabilityReachability::Reachable);
    assert_eq!(page.items[0].package.name, "requests");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quality_metrics_filter() {
    let (client, fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "QualityMetrics",
            json!({
                "repository": {
                    "metrics": [{
                        "name": "Line Coverage",
                        "shortcode": "LCV",
                        "positiveDirection": "UPWARD",
                        "isReported": true,
                        "items": [{ "id": "i1", "key": "AGGREGATE", "latestValue": 81.5, "thresholdStatus": "PASSING" }]
                    }]
                }
            }),
        ),
    ])
    .await;

    let metrics = client
        .get_quality_metrics("gh/acme/api", &[MetricShortcode::Lcv])
        .await
        .unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].items[0].latest_value, Some(81.5));
    assert_eq!(fixture.variables_of("QualityMetrics")["shortcodeIn"], json!(["LCV"]));

    client.get_quality_metrics("gh/acme/api", &[]).await.unwrap();
    assert_eq!(fixture.variables_of("QualityMetrics")["shortcodeIn"], Value::Null);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metric_history_trending_upward() {
    let (client, fixture, _handle) =
        spawn_test_server(vec![viewer_projects(), metric_history("UPWARD")]).await;

    let history = client
        .get_metric_history(&MetricHistoryParams::new("gh/acme/api", MetricShortcode::Lcv))
        .await
        .unwrap()
        .expect("history should exist");

    let values: Vec<f64> = history.values.iter().map(|v| v.value).collect();
    assert_eq!(values, vec![70.0, 75.0, 82.0]);
    assert_eq!(history.positive_direction, MetricDirection::Upward);
    assert!(history.is_trending_positive);
    assert_eq!(history.threshold, Some(80.0));
    assert_eq!(fixture.variables_of("MetricHistory")["limit"], 100);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metric_history_trending_downward() {
    let (client, _fixture, _handle) =
        spawn_test_server(vec![viewer_projects(), metric_history("LOWER_IS_BETTER")]).await;

    let history = client
        .get_metric_history(&MetricHistoryParams::new("gh/acme/api", MetricShortcode::Lcv))
        .await
        .unwrap()
        .expect("history should exist");
    assert_eq!(history.positive_direction, MetricDirection::Downward);
    assert!(!history.is_trending_positive);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_metric_history_unknown_key_is_none() {
    let (client, _fixture, _handle) =
        spawn_test_server(vec![viewer_projects(), metric_history("UPWARD")]).await;

    let params =
        MetricHistoryParams::new("gh/acme/api", MetricShortcode::Lcv).with_metric_key("RUST");
    assert!(client.get_metric_history(&params).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_compliance_report() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "ComplianceReport",
            json!({
                "repository": {
                    "reports": {
                        "owaspTop10": {
                            "key": "OWASP_TOP_10",
                            "title": "OWASP Top 10",
                            "currentValue": 3,
                            "status": "FAILING",
                            "securityIssueStats": [
                                { "key": "a01", "title": "Broken Access Control",
                                  "occurrence": { "critical": 1, "major": 2, "minor": 0, "total": 3 } }
                            ]
                        },
                        "sansTop25": null
                    }
                }
            }),
        ),
    ])
    .await;

    let report = client
        .get_compliance_report("gh/acme/api", ReportType::OwaspTop10)
        .await
        .unwrap()
        .expect("report should exist");
    assert_eq!(report.status, ReportStatus::Failing);
    assert_eq!(report.security_issue_stats[0].occurrence.total, 3);

    let missing = client
        .get_compliance_report("gh/acme/api", ReportType::SansTop25)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_metric_threshold() {
    let (client, fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        ok(
            "SetMetricThreshold",
            json!({ "setRepositoryMetricThreshold": { "ok": true } }),
        ),
    ])
    .await;

    let update = client
        .set_metric_threshold(&MetricThresholdParams {
            project_key: "gh/acme/api".to_string(),
            metric_shortcode: MetricShortcode::Lcv,
            metric_key: "AGGREGATE".to_string(),
            threshold_value: Some(85.0),
        })
        .await
        .unwrap();
    assert!(update.ok);

    let vars = fixture.variables_of("SetMetricThreshold");
    let input = &vars["input"];
    assert_eq!(input["repositoryId"], "UmVwb3NpdG9yeTox");
    assert_eq!(input["metricShortcode"], "LCV");
    assert_eq!(input["thresholdValue"], 85.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutation_unknown_project() {
    let (client, _fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let err = client
        .update_metric_setting(&MetricSettingParams {
            project_key: "gh/acme/nope".to_string(),
            metric_shortcode: MetricShortcode::Dcv,
            is_reported: false,
            is_threshold_enforced: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DeepSourceError::ProjectNotFound { ref key } if key == "gh/acme/nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mutation_does_not_tolerate_none_type() {
    let (client, _fixture, _handle) = spawn_test_server(vec![
        viewer_projects(),
        errors(
            "UpdateMetricSetting",
            &["'NoneType' object has no attribute 'id'"],
        ),
    ])
    .await;

    let err = client
        .update_metric_setting(&MetricSettingParams {
            project_key: "gh/acme/api".to_string(),
            metric_shortcode: MetricShortcode::Lcv,
            is_reported: true,
            is_threshold_enforced: true,
        })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Graphql);
}
