//! Client configuration.

use std::time::Duration;

/// Default DeepSource GraphQL endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.deepsource.io/graphql/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Static configuration for a [`DeepSourceClient`](crate::client::DeepSourceClient).
///
/// Nothing here changes per request, so one client can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Personal access token sent as a bearer token
    pub api_key: String,
    /// GraphQL endpoint URL
    pub base_url: String,
    /// Per-request timeout enforced by the HTTP transport
    pub timeout: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("deepsource-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
