//! Resolved request descriptions.
//!
//! A [`RequestMetadata`] is what an [`Endpoint`](crate::endpoint::Endpoint)
//! resolves to: a method, literal path segments, ordered query pairs and an
//! optional body. It never holds placeholders; segments are escaped later when
//! they are joined onto the base URL.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;

/// Metadata for one HTTP request, relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// The HTTP method.
    pub method: Method,

    /// Unescaped path segments, e.g. `["users", "octo cat"]`.
    pub segments: Vec<String>,

    /// Additional headers for this request.
    pub headers: HeaderMap,

    /// Query parameters in wire order.
    pub query_params: Vec<(String, String)>,

    /// Request body, already encoded.
    pub body: Option<Vec<u8>>,
}

impl RequestMetadata {
    /// Creates a new `RequestMetadata` from a method and `/`-separated path.
    ///
    /// The path is split on `/`; empty segments from leading or doubled
    /// slashes are dropped. Use [`with_segment`](Self::with_segment) to add a
    /// segment that may itself contain `/` or be empty.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Appends one literal path segment.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if the
    /// header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name =
            HeaderName::try_from(name.as_ref()).map_err(|_| crate::Error::InvalidRequest)?;
        let value =
            HeaderValue::try_from(value.as_ref()).map_err(|_| crate::Error::InvalidRequest)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Appends a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Appends every field of `params` as a query parameter.
    ///
    /// Keys are the serde wire names (so `#[serde(rename = "per_page")]`
    /// decides the key), in declaration order. `None` fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if
    /// `params` does not serialize to a flat object.
    pub fn with_query<P: Serialize>(mut self, params: &P) -> Result<Self, crate::Error> {
        let value = serde_json::to_value(params).map_err(|_| crate::Error::InvalidRequest)?;
        let serde_json::Value::Object(fields) = value else {
            return Err(crate::Error::InvalidRequest);
        };

        for (key, value) in fields {
            let value = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(crate::Error::InvalidRequest)
                }
            };
            self.query_params.push((key, value));
        }
        Ok(self)
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if the
    /// body cannot be serialized.
    pub fn with_json_body<B: Serialize>(mut self, body: &B) -> Result<Self, crate::Error> {
        let bytes = serde_json::to_vec(body).map_err(|_| crate::Error::InvalidRequest)?;
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(bytes);
        Ok(self)
    }

    /// The path as it reads before escaping, e.g. `/users/octo cat`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new(Method::GET, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Paging {
        #[serde(rename = "per_page")]
        page_size: i64,
        since: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<String>,
        filter: Option<String>,
    }

    #[test]
    fn test_new_splits_path() {
        let meta = RequestMetadata::new(Method::GET, "/users//octocat/");
        assert_eq!(meta.segments, vec!["users", "octocat"]);
        assert_eq!(meta.path(), "/users/octocat");
    }

    #[test]
    fn test_with_segment_keeps_literal() {
        let meta = RequestMetadata::new(Method::GET, "/users").with_segment("a/b");
        assert_eq!(meta.segments, vec!["users", "a/b"]);
    }

    #[test]
    fn test_with_query_uses_wire_names_in_order() {
        let meta = RequestMetadata::default()
            .with_query(&Paging {
                page_size: 30,
                since: 0,
                cursor: None,
                filter: None,
            })
            .unwrap();
        assert_eq!(
            meta.query_params,
            vec![
                ("per_page".to_string(), "30".to_string()),
                ("since".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_query_rejects_non_object() {
        let result = RequestMetadata::default().with_query(&vec![1, 2]);
        assert_eq!(result.unwrap_err(), crate::Error::InvalidRequest);
    }

    #[test]
    fn test_with_json_body_sets_content_type() {
        let meta = RequestMetadata::new(Method::POST, "/users")
            .with_json_body(&serde_json::json!({"login": "octocat"}))
            .unwrap();
        assert_eq!(meta.body.as_deref(), Some(br#"{"login":"octocat"}"#.as_slice()));
        assert_eq!(meta.headers["content-type"], "application/json");
    }

    #[test]
    fn test_with_header_rejects_invalid_name() {
        let result = RequestMetadata::default().with_header("bad header", "x");
        assert!(result.is_err());
    }
}
