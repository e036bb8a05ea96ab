//! The call pipeline.
//!
//! [`Client`] takes an [`Endpoint`] through build, execute and classify, and
//! hands back exactly one outcome. Use [`ClientBuilder`] to configure it.

use crate::{
    classify::classify_response,
    config::ClientConfig,
    endpoint::Endpoint,
    metadata::RequestMetadata,
    models,
    request::build_request,
    transport::{ReqwestTransport, Transport},
    Error, Result,
};
use http::{header, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Where a single call is in its lifecycle. Calls only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Building,
    Executing,
    Classifying,
    Done,
}

/// A client for the user directory API.
///
/// Cloning is cheap; clones share one transport and its connection pool, so
/// build a single client at startup and pass it around. Calls may run
/// concurrently from any number of tasks.
///
/// # Examples
///
/// ```no_run
/// use hubdir::{Client, endpoint::{Endpoint, ListUsersParams}, models::User};
///
/// # async fn example() -> Result<(), hubdir::Error> {
/// let client = Client::builder().build()?;
///
/// let users: Vec<User> = client
///     .call_json(&Endpoint::ListUsers(ListUsersParams::new(30, 0)))
///     .await?;
/// println!("first page has {} users", users.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    base_url: String,
    default_headers: HeaderMap,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Calls `endpoint` and returns the raw body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Every failure is one of the [`Error`] variants; see
    /// [`execute`](Self::execute).
    pub async fn call(&self, endpoint: &Endpoint) -> Result<Vec<u8>> {
        let metadata = match endpoint.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    endpoint = endpoint.name(),
                    "Request failed"
                );
                return Err(e);
            }
        };
        self.execute(metadata).await
    }

    /// Calls `endpoint` and decodes a 2xx body as JSON.
    ///
    /// # Errors
    ///
    /// As [`call`](Self::call), plus [`Error::DecodingError`] when the body
    /// does not match `T`.
    pub async fn call_json<T>(&self, endpoint: &Endpoint) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.call(endpoint).await?;
        models::decode(&body)
    }

    /// Runs one request through the pipeline.
    ///
    /// A request that cannot be built fails with [`Error::InvalidRequest`]
    /// before the transport is touched. Otherwise exactly one attempt is
    /// made: 2xx returns the body, any other status or transport failure is
    /// classified into an [`Error`].
    pub async fn execute(&self, metadata: RequestMetadata) -> Result<Vec<u8>> {
        let start_time = Instant::now();

        trace_state(CallState::Building);
        let built = build_request(&self.inner.base_url, &metadata, &self.inner.default_headers);
        let request = match built {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    method = %metadata.method,
                    base_url = %self.inner.base_url,
                    path = %metadata.path(),
                    "Request failed"
                );
                trace_state(CallState::Done);
                return Err(e);
            }
        };

        let method = request.method.clone();
        let url = request.url.to_string();

        tracing::info!(method = %method, url = %url, "Make request");

        trace_state(CallState::Executing);
        let result = self.inner.transport.execute(request).await;

        trace_state(CallState::Classifying);
        let outcome = match result {
            Ok(response) => {
                tracing::info!(
                    status = response.status,
                    url = %url,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Received response"
                );

                match response.pretty_json() {
                    Some(pretty) => tracing::debug!(url = %url, body = %pretty, "Response body"),
                    None => tracing::warn!(url = %url, "Failed to decode JSON"),
                }

                classify_response(response)
            }
            Err(e) => Err(Error::from(e)),
        };

        if let Err(e) = &outcome {
            tracing::warn!(
                error = %e,
                method = %method,
                url = %url,
                "Request failed"
            );
        }

        trace_state(CallState::Done);
        outcome
    }
}

fn trace_state(state: CallState) {
    tracing::trace!(state = ?state, "Call state");
}

/// Builder for configuring and creating a [`Client`].
///
/// Starts from [`ClientConfig::default`]: the public GitHub API with 10 second
/// timeouts.
///
/// # Examples
///
/// ```no_run
/// use hubdir::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), hubdir::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://github.example.com/api/v3")
///     .resource_timeout(Duration::from_secs(30))
///     .default_header("X-GitHub-Api-Version", "2022-11-28")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: ClientConfig,
    default_headers: HeaderMap,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            default_headers: HeaderMap::new(),
            transport: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the base URL. It is not validated until a call is made.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the idle read timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Sets the total timeout for one exchange.
    pub fn resource_timeout(mut self, timeout: Duration) -> Self {
        self.config.resource_timeout = timeout;
        self
    }

    /// Sets the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref()).map_err(|_| Error::InvalidRequest)?;
        let value = HeaderValue::try_from(value.as_ref()).map_err(|_| Error::InvalidRequest)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Uses `transport` instead of building a [`ReqwestTransport`].
    ///
    /// The configured timeouts only apply to the built-in transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the user agent is not a valid
    /// header value, or [`Error::TransportFailed`] if the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<Client> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            header::USER_AGENT,
            HeaderValue::try_from(self.config.user_agent.as_str())
                .map_err(|_| Error::InvalidRequest)?,
        );
        for (name, value) in &self.default_headers {
            default_headers.insert(name.clone(), value.clone());
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.config.request_timeout,
                self.config.resource_timeout,
            )?),
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                base_url: self.config.base_url,
                default_headers,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        endpoint::{GetUserParams, ListUsersParams},
        transport::{TransportError, TransportRequest},
        RawResponse,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a canned result and records every request it sees.
    struct FakeTransport {
        reply: std::result::Result<RawResponse, TransportError>,
        seen: Mutex<Vec<TransportRequest>>,
    }

    impl FakeTransport {
        fn new(reply: std::result::Result<RawResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> std::result::Result<RawResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn client_with(fake: Arc<FakeTransport>, base_url: &str) -> Client {
        Client::builder()
            .base_url(base_url)
            .transport(fake)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let fake = FakeTransport::new(Ok(RawResponse::new(200, HeaderMap::new(), b"[]".to_vec())));
        let client = client_with(fake.clone(), "https://api.github.com");

        let body = client
            .call(&Endpoint::ListUsers(ListUsersParams::new(30, 0)))
            .await
            .unwrap();

        assert_eq!(body, b"[]");
        let seen = fake.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].url.as_str(),
            "https://api.github.com/users?per_page=30&since=0"
        );
        assert_eq!(seen[0].headers["accept"], "application/json");
        assert!(seen[0].headers.contains_key("user-agent"));
    }

    #[tokio::test]
    async fn test_malformed_base_url_skips_transport() {
        let fake = FakeTransport::new(Ok(RawResponse::new(200, HeaderMap::new(), Vec::new())));
        let client = client_with(fake.clone(), "not a url");

        let result = client
            .call(&Endpoint::GetUser(GetUserParams::new("octocat")))
            .await;

        assert_eq!(result, Err(Error::InvalidRequest));
        assert!(fake.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_status_is_classified() {
        let fake = FakeTransport::new(Ok(RawResponse::new(
            404,
            HeaderMap::new(),
            br#"{"message":"Not Found"}"#.to_vec(),
        )));
        let client = client_with(fake, "https://api.github.com");

        let result = client
            .call(&Endpoint::GetUser(GetUserParams::new("ghost")))
            .await;
        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn test_transport_failure_is_classified() {
        let fake = FakeTransport::new(Err(TransportError::ConnectionLost));
        let client = client_with(fake, "https://api.github.com");

        let result = client
            .call(&Endpoint::ListUsers(ListUsersParams::new(1, 0)))
            .await;
        assert_eq!(result, Err(Error::NoInternet));
    }

    #[tokio::test]
    async fn test_call_json_decoding_error() {
        let fake = FakeTransport::new(Ok(RawResponse::new(200, HeaderMap::new(), b"{}".to_vec())));
        let client = client_with(fake, "https://api.github.com");

        let result = client
            .call_json::<Vec<models::User>>(&Endpoint::ListUsers(ListUsersParams::new(1, 0)))
            .await;
        assert!(matches!(result, Err(Error::DecodingError(_))));
    }

    #[test]
    fn test_custom_default_header_overrides_accept() {
        let fake = FakeTransport::new(Err(TransportError::TimedOut));
        let client = Client::builder()
            .transport(fake)
            .default_header("Accept", "application/vnd.github+json")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            client.inner.default_headers["accept"],
            "application/vnd.github+json"
        );
        assert_eq!(client.base_url(), "https://api.github.com");
    }

    #[test]
    fn test_invalid_user_agent() {
        let fake = FakeTransport::new(Err(TransportError::TimedOut));
        let result = Client::builder().transport(fake).user_agent("bad\nagent").build();
        assert!(matches!(result, Err(Error::InvalidRequest)));
    }
}
