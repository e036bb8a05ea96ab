//! Client configuration.

use crate::transport::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_RESOURCE_TIMEOUT};
use serde::Deserialize;
use std::time::Duration;

/// Base URL of the public GitHub API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// User agent sent when none is configured. GitHub rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("hubdir/", env!("CARGO_PKG_VERSION"));

/// Settings supplied once when the client is created.
///
/// Deserializes from a config section with timeouts in whole seconds; missing
/// keys fall back to the defaults.
///
/// ```
/// use hubdir::ClientConfig;
/// use std::time::Duration;
///
/// let config: ClientConfig = serde_json::from_str(
///     r#"{ "base_url": "http://localhost:8080", "request_timeout": 3 }"#,
/// ).unwrap();
/// assert_eq!(config.base_url, "http://localhost:8080");
/// assert_eq!(config.request_timeout, Duration::from_secs(3));
/// assert_eq!(config.resource_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host the endpoints are resolved against. Validated per call, not here.
    pub base_url: String,

    /// Longest idle wait for response data.
    #[serde(deserialize_with = "duration_secs")]
    pub request_timeout: Duration,

    /// Longest total time for one exchange.
    #[serde(deserialize_with = "duration_secs")]
    pub resource_timeout: Duration,

    pub user_agent: String,
}

fn duration_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            resource_timeout: DEFAULT_RESOURCE_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Creates a new builder for configuring the client.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for `ClientConfig`.
#[derive(Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    resource_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn resource_timeout(mut self, timeout: Duration) -> Self {
        self.resource_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the `ClientConfig`.
    pub fn build(self) -> ClientConfig {
        let default = ClientConfig::default();
        ClientConfig {
            base_url: self.base_url.unwrap_or(default.base_url),
            request_timeout: self.request_timeout.unwrap_or(default.request_timeout),
            resource_timeout: self.resource_timeout.unwrap_or(default.resource_timeout),
            user_agent: self.user_agent.unwrap_or(default.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.github.com");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.resource_timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("hubdir/"));
    }

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9000")
            .resource_timeout(Duration::from_secs(2))
            .build();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.resource_timeout, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_deserialize_empty_section() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
