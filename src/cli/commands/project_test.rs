use crate::cli::commands::project::*;
use crate::test_support::{spawn_test_server, viewer_projects};

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects_json() {
    let (client, _fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let output = list_projects(&client, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(parsed.is_array(), "Output should be an array");
    assert_eq!(parsed[0]["key"], "gh/acme/api");
    assert_eq!(parsed[0]["repository"]["provider"], "GITHUB");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects_table() {
    let (client, _fixture, _handle) = spawn_test_server(vec![viewer_projects()]).await;

    let output = list_projects(&client, "table").await.unwrap();
    assert!(output.contains("Key"));
    assert!(output.contains("gh/acme/api"));
    assert!(output.contains("GITHUB"));
    assert!(output.contains("yes"));
}

#[test]
fn test_format_table_empty() {
    assert_eq!(format_table(&[]), "No projects found.");
}
