//! In-process GraphQL fixture server shared by the client and CLI tests.

use axum::Router;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::client::{ClientConfig, DeepSourceClient};

/// Operation name, HTTP status and body served for it.
pub type Canned = (&'static str, StatusCode, Value);

/// Canned GraphQL server: answers each operation (matched by name) with a
/// fixed status and body, and records every request it receives.
#[derive(Clone, Default)]
pub struct Fixture {
    responses: Arc<Vec<Canned>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl Fixture {
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Variables of the last request for `operation`.
    pub fn variables_of(&self, operation: &str) -> Value {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| {
                r["query"]
                    .as_str()
                    .is_some_and(|q| q.contains(&format!(" {}", operation)))
            })
            .map(|r| r["variables"].clone())
            .unwrap_or(Value::Null)
    }
}

async fn graphql(
    State(fixture): State<Fixture>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fixture.requests.lock().unwrap().push(body.clone());
    let query = body["query"].as_str().unwrap_or_default();
    for (operation, status, response) in fixture.responses.iter() {
        if query.contains(&format!("query {}", operation))
            || query.contains(&format!("mutation {}", operation))
        {
            return (*status, Json(response.clone()));
        }
    }
    (StatusCode::OK, Json(json!({ "data": null })))
}

/// Spawn a fixture server and a client pointed at it
pub async fn spawn_test_server(
    responses: Vec<Canned>,
) -> (DeepSourceClient, Fixture, tokio::task::JoinHandle<()>) {
    let fixture = Fixture {
        responses: Arc::new(responses),
        requests: Arc::default(),
    };
    let app = Router::new()
        .route("/graphql/", post(graphql))
        .with_state(fixture.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config =
        ClientConfig::new("test-token").with_base_url(format!("http://{}/graphql/", addr));
    let client = DeepSourceClient::new(config).expect("client should build");
    (client, fixture, handle)
}

pub fn ok(operation: &'static str, data: Value) -> Canned {
    (operation, StatusCode::OK, json!({ "data": data }))
}

pub fn errors(operation: &'static str, messages: &[&str]) -> Canned {
    let errors: Vec<Value> = messages.iter().map(|m| json!({ "message": m })).collect();
    (
        operation,
        StatusCode::OK,
        json!({ "data": null, "errors": errors }),
    )
}

/// One account `acme` owning the GitHub repository `gh/acme/api`.
pub fn viewer_projects() -> Canned {
    ok(
        "ViewerProjects",
        json!({
            "viewer": {
                "email": "dev@acme.test",
                "accounts": {
                    "edges": [{
                        "node": {
                            "login": "acme",
                            "repositories": {
                                "edges": [{
                                    "node": {
                                        "id": "UmVwb3NpdG9yeTox",
                                        "name": "api",
                                        "defaultBranch": "main",
                                        "dsn": "gh/acme/api",
                                        "isPrivate": true,
                                        "isActivated": true,
                                        "vcsProvider": "GITHUB"
                                    }
                                }]
                            }
                        }
                    }]
                }
            }
        }),
    )
}
