//! Response records returned by the user directory.

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One entry of the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub id: u64,
}

/// The full profile of a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub login: String,
    pub avatar_url: String,
    pub blog: String,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub name: String,
}

/// Decodes a JSON body, reporting failures as [`Error::DecodingError`].
///
/// # Examples
///
/// ```
/// use hubdir::{models::{decode, User}, Error};
///
/// let users: Vec<User> = decode(br#"[]"#).unwrap();
/// assert!(users.is_empty());
///
/// let err = decode::<User>(b"{}").unwrap_err();
/// assert!(matches!(err, Error::DecodingError(_)));
/// ```
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to deserialize response");
        Error::DecodingError(e.to_string())
    })
}
