//! DeepSource GraphQL client.
//!
//! # Architecture
//!
//! - `pagination`: normalizes caller pagination into one Relay direction
//! - `extract`: defensive walk of `repository.<connection>` responses
//! - `classify`: turns request failures into "absent" or a normalized error
//! - `error`: the error type surfaced to callers
//! - `queries`: fixed GraphQL documents
//! - `repository`, `mutations`: the public operations
//!
//! [`DeepSourceClient`] holds only immutable configuration and a shared
//! `reqwest::Client`, so it can be cloned and used from concurrent tasks.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
mod mutations;
pub mod pagination;
pub mod queries;
mod repository;

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub use classify::{Absence, Classified, RequestFailure, classify};
pub use config::ClientConfig;
pub use error::{DeepSourceError, DeepSourceResult, ErrorCategory};
pub use extract::{PageInfo, PaginatedResponse};
pub use mutations::{MetricSettingParams, MetricThresholdParams};
pub use pagination::PaginationParams;
pub use repository::MetricHistoryParams;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::classify::GraphqlErrorEntry;
use crate::mapping::map_projects;
use crate::models::Project;

/// Request body for a GraphQL POST.
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Client for the DeepSource GraphQL API.
#[derive(Debug, Clone)]
pub struct DeepSourceClient {
    endpoint: String,
    http: reqwest::Client,
}

impl DeepSourceClient {
    /// Build a client from configuration.
    ///
    /// Fails when the API key is empty or cannot be sent as a header.
    pub fn new(config: ClientConfig) -> DeepSourceResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        if config.api_key.trim().is_empty() {
            return Err(DeepSourceError::Config {
                message: "API key must not be empty".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            DeepSourceError::Config {
                message: "API key contains characters not allowed in a header".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeepSourceError::Config {
                message: e.to_string(),
            })?;

        Ok(Self {
            endpoint: config.base_url,
            http,
        })
    }

    /// Get the endpoint being used
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one GraphQL document and return its `data` object.
    ///
    /// A body with neither `data` nor `errors` yields `Value::Null`, which the
    /// extractors treat as an empty result.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, RequestFailure> {
        debug!(
            endpoint = %self.endpoint,
            operation = operation_name(query),
            "sending GraphQL request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let errors = serde_json::from_str::<Value>(&text)
                .map(|body| GraphqlErrorEntry::list_from(body.get("errors")))
                .unwrap_or_default();
            debug!(status = status.as_u16(), "GraphQL request failed");
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                errors,
                body: text,
            });
        }

        let mut body: Value =
            serde_json::from_str(&text).map_err(|e| RequestFailure::Decode {
                message: format!("invalid response body: {}", e),
            })?;
        let errors = GraphqlErrorEntry::list_from(body.get("errors"));
        if !errors.is_empty() {
            return Err(RequestFailure::Graphql { errors });
        }

        Ok(body
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Execute, then resolve failures through the classifier.
    ///
    /// `Ok(None)` means the failure was classified as an absent result.
    async fn fetch(
        &self,
        query: &str,
        variables: Value,
        absence: Absence,
    ) -> DeepSourceResult<Option<Value>> {
        match self.execute(query, variables).await {
            Ok(data) => Ok(Some(data)),
            Err(failure) => match classify(&failure, absence) {
                Classified::Absent => {
                    debug!(?failure, "treating upstream failure as absent result");
                    Ok(None)
                }
                Classified::Failed(err) => Err(err),
            },
        }
    }

    /// List every project (repository) visible to the API key.
    pub async fn list_projects(&self) -> DeepSourceResult<Vec<Project>> {
        let data = self
            .fetch(queries::VIEWER_PROJECTS, json!({}), Absence::TolerateNull)
            .await?;
        Ok(data.as_ref().map(map_projects).unwrap_or_default())
    }

    /// Find a project by key.
    pub async fn find_project(&self, project_key: &str) -> DeepSourceResult<Option<Project>> {
        let project = self
            .list_projects()
            .await?
            .into_iter()
            .find(|p| p.key == project_key);
        if project.is_none() {
            debug!(project_key, "no project with this key");
        }
        Ok(project)
    }
}

/// Variables addressing a project's repository.
fn repository_variables(project: &Project) -> Map<String, Value> {
    let mut vars = Map::new();
    vars.insert("login".into(), json!(project.repository.login));
    vars.insert("name".into(), json!(project.repository.name));
    vars.insert("provider".into(), json!(project.repository.provider));
    vars
}

/// Name of the first operation in a GraphQL document, for logging.
fn operation_name(query: &str) -> &str {
    query
        .split_whitespace()
        .skip_while(|w| !matches!(*w, "query" | "mutation"))
        .nth(1)
        .map(|name| name.split(['(', '{']).next().unwrap_or(name))
        .unwrap_or("anonymous")
}
