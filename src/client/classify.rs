//! Failure classification.
//!
//! The upstream API is backed by a Python service that reports missing
//! objects as generic GraphQL errors (`'NoneType' object has no attribute
//! ...`) or `... not found` messages. Reads treat those as an absent result.
//! Every other failure becomes a [`DeepSourceError`] with a fixed message.
//!
//! Matching on message substrings is brittle, but the upstream offers no
//! structured error codes, so the sentinels below are the contract.

use serde_json::Value;

use crate::client::error::{DeepSourceError, GraphqlMessages};

/// Substring marking a server-side null dereference.
pub const NONE_TYPE_SENTINEL: &str = "NoneType";

/// Substring (matched case-insensitively) marking a missing object.
pub const NOT_FOUND_SENTINEL: &str = "not found";

/// One entry of a GraphQL `errors` array.
///
/// `message` is `None` when the entry has no string message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlErrorEntry {
    pub message: Option<String>,
}

impl GraphqlErrorEntry {
    pub fn from_value(value: &Value) -> Self {
        Self {
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Parse every entry of an `errors` array; non-arrays yield nothing.
    pub fn list_from(errors: Option<&Value>) -> Vec<Self> {
        errors
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(Self::from_value).collect())
            .unwrap_or_default()
    }

    fn text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Low-level transport failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Connect,
    Timeout,
    Other,
}

/// A failed request, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Successful HTTP exchange whose body carried a non-empty `errors` array.
    Graphql { errors: Vec<GraphqlErrorEntry> },
    /// Non-success HTTP status; `errors` holds any GraphQL errors in the body.
    Status {
        status: u16,
        errors: Vec<GraphqlErrorEntry>,
        body: String,
    },
    /// The request never produced a response.
    Transport { kind: TransportKind, message: String },
    /// The response body could not be decoded.
    Decode { message: String },
}

impl From<reqwest::Error> for RequestFailure {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            TransportKind::Timeout
        } else if e.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };
        RequestFailure::Transport {
            kind,
            message: e.to_string(),
        }
    }
}

impl RequestFailure {
    fn graphql_errors(&self) -> &[GraphqlErrorEntry] {
        match self {
            RequestFailure::Graphql { errors } | RequestFailure::Status { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Human-readable description, if the failure carries one.
    fn description(&self) -> Option<String> {
        let text = match self {
            RequestFailure::Graphql { errors } | RequestFailure::Status { errors, .. }
                if !errors.is_empty() =>
            {
                errors
                    .iter()
                    .map(GraphqlErrorEntry::text)
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            RequestFailure::Status { status, body, .. } => match body.trim() {
                "" => format!("HTTP {}", status),
                body => format!("HTTP {}: {}", status, truncate(body, 200)),
            },
            RequestFailure::Transport { message, .. } | RequestFailure::Decode { message } => {
                message.clone()
            }
            RequestFailure::Graphql { .. } => String::new(),
        };
        (!text.is_empty()).then_some(text)
    }

    fn mentions_none_type(&self) -> bool {
        self.graphql_errors()
            .iter()
            .any(|e| e.text().contains(NONE_TYPE_SENTINEL))
    }

    fn mentions_not_found(&self) -> bool {
        let hit = |s: &str| s.contains(NOT_FOUND_SENTINEL);
        // A raw HTTP body is never a lookup result; a 404 page means a bad URL.
        self.graphql_errors().iter().any(|e| hit(e.text()))
            || match self {
                RequestFailure::Transport { message, .. } | RequestFailure::Decode { message } => {
                    hit(message)
                }
                RequestFailure::Graphql { .. } | RequestFailure::Status { .. } => false,
            }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}...", head)
    }
}

/// What an operation accepts as a normal "nothing there" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Every failure is an error (mutations).
    Reject,
    /// Upstream null dereferences mean "empty" (list and history reads).
    TolerateNull,
    /// Null dereferences and "not found" messages mean "absent" (lookups by identifier).
    TolerateMissing,
}

impl Absence {
    fn tolerates_null(self) -> bool {
        matches!(self, Absence::TolerateNull | Absence::TolerateMissing)
    }

    fn tolerates_missing(self) -> bool {
        matches!(self, Absence::TolerateMissing)
    }
}

/// Outcome of classifying a failure.
#[derive(Debug)]
pub enum Classified {
    /// The requested object does not exist; return an empty result.
    Absent,
    /// Surface this error to the caller.
    Failed(DeepSourceError),
}

/// Decide whether `failure` means "absent" or a real error. First match wins:
///
/// 1. GraphQL errors mentioning `NoneType`, if `absence` tolerates null.
/// 2. A GraphQL, transport or decode message containing `not found`, if
///    `absence` tolerates missing. HTTP bodies are not inspected.
/// 3. GraphQL errors present: `GraphQL Errors: ...`.
/// 4. Connection or timeout failures.
/// 5. HTTP 401 and 429.
/// 6. Anything else with a description: `DeepSource API error: ...`.
/// 7. Otherwise an unknown error.
pub fn classify(failure: &RequestFailure, absence: Absence) -> Classified {
    if absence.tolerates_null() && failure.mentions_none_type() {
        return Classified::Absent;
    }
    if absence.tolerates_missing() && failure.mentions_not_found() {
        return Classified::Absent;
    }

    let errors = failure.graphql_errors();
    if !errors.is_empty() {
        let messages = errors.iter().map(|e| e.text().to_string()).collect();
        return Classified::Failed(DeepSourceError::Graphql(GraphqlMessages(messages)));
    }

    let error = match failure {
        RequestFailure::Transport {
            kind: TransportKind::Connect,
            ..
        } => DeepSourceError::Connection,
        RequestFailure::Transport {
            kind: TransportKind::Timeout,
            ..
        } => DeepSourceError::Timeout,
        RequestFailure::Status { status: 401, .. } => DeepSourceError::Authentication,
        RequestFailure::Status { status: 429, .. } => DeepSourceError::RateLimited,
        other => match other.description() {
            Some(message) => DeepSourceError::Api { message },
            None => DeepSourceError::Unknown,
        },
    };
    Classified::Failed(error)
}
