//! Client error types.
//!
//! Every failure surfaced to callers is a [`DeepSourceError`] with a fixed,
//! human-readable message. Upstream failures reach this type only through the
//! classifier in [`crate::client::classify`]; the remaining variants come from
//! client-side validation.

use std::fmt;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Coarse category attached to every error, for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Network,
    Auth,
    RateLimit,
    Graphql,
    NotFound,
    Client,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCategory::Network => "NETWORK",
            ErrorCategory::Auth => "AUTH",
            ErrorCategory::RateLimit => "RATE_LIMIT",
            ErrorCategory::Graphql => "GRAPHQL",
            ErrorCategory::NotFound => "NOT_FOUND",
            ErrorCategory::Client => "CLIENT",
            ErrorCategory::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// GraphQL error messages joined for display.
///
/// Renders as `GraphQL Errors: <m1>, <m2>` regardless of how many there are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlMessages(pub Vec<String>);

impl fmt::Display for GraphqlMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphQL Errors: {}", self.0.join(", "))
    }
}

#[derive(Error, Diagnostic, Debug)]
pub enum DeepSourceError {
    #[error("{0}")]
    #[diagnostic(code(deepsource::client::graphql))]
    Graphql(GraphqlMessages),

    #[error("Connection error: Unable to connect to DeepSource API")]
    #[diagnostic(
        code(deepsource::client::connection),
        help("Check your network connection and the configured API URL.")
    )]
    Connection,

    #[error("Timeout error: DeepSource API request timed out")]
    #[diagnostic(
        code(deepsource::client::timeout),
        help("The request exceeded the configured timeout. Try again or raise --timeout-secs.")
    )]
    Timeout,

    #[error("Authentication error: Invalid or expired API key")]
    #[diagnostic(
        code(deepsource::client::auth),
        help("Generate a new personal access token in DeepSource account settings.")
    )]
    Authentication,

    #[error("Rate limit exceeded: Too many requests to DeepSource API")]
    #[diagnostic(code(deepsource::client::rate_limited))]
    RateLimited,

    #[error("DeepSource API error: {message}")]
    #[diagnostic(code(deepsource::client::api))]
    Api { message: String },

    #[error("Unknown error occurred while communicating with DeepSource API")]
    #[diagnostic(code(deepsource::client::unknown))]
    Unknown,

    #[error("Project not found: {key}")]
    #[diagnostic(
        code(deepsource::client::project_not_found),
        help("Run `dsq projects` to list the project keys available to this token.")
    )]
    ProjectNotFound { key: String },

    #[error("Invalid client configuration: {message}")]
    #[diagnostic(code(deepsource::client::config))]
    Config { message: String },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(deepsource::client::invalid_input))]
    InvalidInput { message: String },
}

impl DeepSourceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeepSourceError::Graphql(_) => ErrorCategory::Graphql,
            DeepSourceError::Connection | DeepSourceError::Timeout => ErrorCategory::Network,
            DeepSourceError::Authentication => ErrorCategory::Auth,
            DeepSourceError::RateLimited => ErrorCategory::RateLimit,
            DeepSourceError::ProjectNotFound { .. } => ErrorCategory::NotFound,
            DeepSourceError::Config { .. } | DeepSourceError::InvalidInput { .. } => {
                ErrorCategory::Client
            }
            DeepSourceError::Api { .. } | DeepSourceError::Unknown => ErrorCategory::Unknown,
        }
    }
}

pub type DeepSourceResult<T> = Result<T, DeepSourceError>;
