use crate::client::error::*;

#[test]
fn test_single_graphql_message() {
    let err = DeepSourceError::Graphql(GraphqlMessages(vec!["boom".to_string()]));
    assert_eq!(err.to_string(), "GraphQL Errors: boom");
}

#[test]
fn test_category_display() {
    assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
    assert_eq!(ErrorCategory::NotFound.to_string(), "NOT_FOUND");
    assert_eq!(
        serde_json::to_value(ErrorCategory::Graphql).unwrap(),
        serde_json::json!("GRAPHQL")
    );
}

#[test]
fn test_project_not_found() {
    let err = DeepSourceError::ProjectNotFound {
        key: "gh/acme/api".to_string(),
    };
    assert_eq!(err.to_string(), "Project not found: gh/acme/api");
    assert_eq!(err.category(), ErrorCategory::NotFound);
}

#[test]
fn test_client_side_errors() {
    let err = DeepSourceError::InvalidInput {
        message: "metric key must not be empty".to_string(),
    };
    assert_eq!(err.category(), ErrorCategory::Client);

    let err = DeepSourceError::Config {
        message: "API key must not be empty".to_string(),
    };
    assert!(err.to_string().starts_with("Invalid client configuration"));
}

#[test]
fn test_diagnostic_codes() {
    use miette::Diagnostic;

    let code = DeepSourceError::Authentication.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("deepsource::client::auth"));
    assert!(DeepSourceError::Connection.help().is_some());
}
