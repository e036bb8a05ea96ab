//! The user directory endpoints and their parameter records.
//!
//! Each [`Endpoint`] variant owns its typed parameters and resolves to a
//! [`RequestMetadata`] through [`Endpoint::metadata`]. Adding an operation
//! means adding a variant and a match arm.

use crate::{metadata::RequestMetadata, Result};
use http::Method;
use serde::Serialize;

/// Parameters for listing users.
///
/// Values are passed through unchecked; a negative page size reaches the
/// server as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListUsersParams {
    /// Page size, sent as `per_page`.
    #[serde(rename = "per_page")]
    pub page_size: i64,

    /// Only users with an id greater than this are returned.
    pub since: i64,
}

impl ListUsersParams {
    pub fn new(page_size: i64, since: i64) -> Self {
        Self { page_size, since }
    }
}

/// Parameters for fetching a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUserParams {
    pub username: String,
}

impl GetUserParams {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// One logical call against the user directory.
///
/// # Examples
///
/// ```
/// use hubdir::endpoint::{Endpoint, GetUserParams};
///
/// let meta = Endpoint::GetUser(GetUserParams::new("octo cat")).metadata().unwrap();
/// assert_eq!(meta.path(), "/users/octo cat");
/// assert!(meta.query_params.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /users?per_page=..&since=..`
    ListUsers(ListUsersParams),

    /// `GET /users/{username}`
    GetUser(GetUserParams),
}

impl Endpoint {
    /// Resolves this endpoint into request metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) if the
    /// parameters cannot be encoded as query pairs.
    pub fn metadata(&self) -> Result<RequestMetadata> {
        match self {
            Endpoint::ListUsers(params) => {
                RequestMetadata::new(Method::GET, "/users").with_query(params)
            }
            Endpoint::GetUser(params) => Ok(RequestMetadata::new(Method::GET, "/users")
                .with_segment(params.username.as_str())),
        }
    }

    /// A short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ListUsers(_) => "list_users",
            Endpoint::GetUser(_) => "get_user",
        }
    }
}

impl From<ListUsersParams> for Endpoint {
    fn from(params: ListUsersParams) -> Self {
        Endpoint::ListUsers(params)
    }
}

impl From<GetUserParams> for Endpoint {
    fn from(params: GetUserParams) -> Self {
        Endpoint::GetUser(params)
    }
}
