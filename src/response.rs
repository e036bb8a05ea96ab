//! The raw result of one completed HTTP exchange.
//!
//! A [`RawResponse`] is whatever came back over the wire, including 4xx and
//! 5xx responses. It is handed straight to the classifier and not kept.

use http::HeaderMap;

/// Status, headers and body bytes of a completed exchange.
///
/// # Examples
///
/// ```
/// use hubdir::RawResponse;
/// use http::{HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("content-type", HeaderValue::from_static("application/json"));
///
/// let response = RawResponse::new(200, headers, br#"{"login":"octocat"}"#.to_vec());
/// assert_eq!(response.header("content-type"), Some("application/json"));
/// assert!(response.pretty_json().unwrap().contains("\"login\": \"octocat\""));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,

    /// The response headers.
    pub headers: HeaderMap,

    /// The response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns a header value by name, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Re-renders the body as indented JSON, or `None` if it is not JSON.
    pub fn pretty_json(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_json_rejects_non_json() {
        let response = RawResponse::new(200, HeaderMap::new(), b"<html>".to_vec());
        assert_eq!(response.pretty_json(), None);
    }

    #[test]
    fn test_pretty_json_empty_body() {
        let response = RawResponse::new(204, HeaderMap::new(), Vec::new());
        assert_eq!(response.pretty_json(), None);
    }

    #[test]
    fn test_missing_header() {
        let response = RawResponse::new(200, HeaderMap::new(), Vec::new());
        assert_eq!(response.header("etag"), None);
    }
}
