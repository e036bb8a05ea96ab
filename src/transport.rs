//! Network transport.
//!
//! [`Transport`] is the seam between the call pipeline and the network. The
//! production implementation, [`ReqwestTransport`], wraps one pooled
//! `reqwest::Client`; tests can swap in anything that implements the trait.

use crate::RawResponse;
use async_trait::async_trait;
use http::{HeaderMap, Method};
use std::time::Duration;
use url::Url;

/// Default per-request (idle read) timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default total timeout for one exchange, body included.
pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully built request: absolute URL, method, headers and body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// A transport-level failure. HTTP error statuses are not transport failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("timed out")]
    TimedOut,

    /// No route to the network or host.
    #[error("not connected")]
    NotConnected,

    /// An established connection dropped before the response completed.
    #[error("connection lost")]
    ConnectionLost,

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        use std::io::ErrorKind;

        if err.is_timeout() || has_io_kind(&err, &[ErrorKind::TimedOut]) {
            return TransportError::TimedOut;
        }
        if has_io_kind(
            &err,
            &[
                ErrorKind::NetworkUnreachable,
                ErrorKind::HostUnreachable,
                ErrorKind::NetworkDown,
            ],
        ) {
            return TransportError::NotConnected;
        }
        if is_dropped_by_peer(&err)
            || has_io_kind(
                &err,
                &[
                    ErrorKind::ConnectionReset,
                    ErrorKind::ConnectionAborted,
                    ErrorKind::BrokenPipe,
                    ErrorKind::UnexpectedEof,
                ],
            )
        {
            return TransportError::ConnectionLost;
        }
        // Refused connections and resolver failures land here.
        TransportError::Other(error_chain(&err))
    }
}

fn sources<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> impl Iterator<Item = &'a (dyn std::error::Error + 'static)> {
    std::iter::successors(Some(err), |e| e.source())
}

/// Walks the source chain looking for an I/O error of one of `kinds`.
fn has_io_kind(err: &(dyn std::error::Error + 'static), kinds: &[std::io::ErrorKind]) -> bool {
    sources(err)
        .filter_map(|e| e.downcast_ref::<std::io::Error>())
        .any(|io| kinds.contains(&io.kind()))
}

/// hyper reports a peer closing before the response completes as an
/// incomplete message, or as canceled when the connection went away while
/// the request was queued on it.
fn is_dropped_by_peer(err: &(dyn std::error::Error + 'static)) -> bool {
    sources(err)
        .filter_map(|e| e.downcast_ref::<hyper::Error>())
        .any(|h| h.is_incomplete_message() || h.is_canceled())
}

/// Joins the error and all of its sources, e.g.
/// `error sending request for url (..): client error (Connect): Connection refused`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    for e in sources(err) {
        let text = e.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
    }
    parts.join(": ")
}

/// Executes one request, once. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the completed exchange, whatever its status.
    async fn execute(&self, request: TransportRequest)
        -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given idle-read and total timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Other`] if the TLS backend fails to initialize.
    pub fn new(
        request_timeout: Duration,
        resource_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .read_timeout(request_timeout)
            .timeout(resource_timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest::Client`, keeping whatever timeouts and
    /// proxy settings it was built with.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body.to_vec()))
    }
}
