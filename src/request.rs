//! Turns request metadata into a concrete [`TransportRequest`].

use crate::{metadata::RequestMetadata, transport::TransportRequest, Error, Result};
use http::HeaderMap;
use url::Url;

/// Joins `metadata` onto `base_url` and merges headers.
///
/// Path segments are percent-encoded one by one, so a username containing a
/// space or `/` stays a single segment. Query pairs are form-encoded in
/// order. Request headers override `default_headers` of the same name.
///
/// This performs no I/O.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if `base_url` does not parse or cannot
/// carry a path (e.g. `mailto:`).
///
/// # Examples
///
/// ```
/// use hubdir::endpoint::{Endpoint, ListUsersParams};
/// use hubdir::request::build_request;
/// use http::HeaderMap;
///
/// let meta = Endpoint::ListUsers(ListUsersParams::new(30, 0)).metadata().unwrap();
/// let request = build_request("https://api.github.com", &meta, &HeaderMap::new()).unwrap();
/// assert_eq!(request.url.as_str(), "https://api.github.com/users?per_page=30&since=0");
/// ```
pub fn build_request(
    base_url: &str,
    metadata: &RequestMetadata,
    default_headers: &HeaderMap,
) -> Result<TransportRequest> {
    let mut url = Url::parse(base_url).map_err(|_| Error::InvalidRequest)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidRequest);
    }

    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|_| Error::InvalidRequest)?;
        path.pop_if_empty();
        path.extend(metadata.segments.iter().map(String::as_str));
    }

    if !metadata.query_params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(metadata.query_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    let mut headers = default_headers.clone();
    for (name, value) in &metadata.headers {
        headers.insert(name.clone(), value.clone());
    }

    Ok(TransportRequest {
        method: metadata.method.clone(),
        url,
        headers,
        body: metadata.body.clone(),
    })
}
