//! Error types for user directory API calls.
//!
//! Every failure a call can hit (building the request, the network exchange,
//! the HTTP status, decoding the body) is converted into exactly one [`Error`]
//! variant. Nothing else escapes the pipeline.

/// The closed set of failures a call can produce.
///
/// Only the variants that need it carry data: the status code for the
/// catch-all 4xx/5xx buckets, the decoder message, and the transport detail.
/// The `Display` text is meant to be shown to a user as-is.
///
/// # Examples
///
/// ```
/// use hubdir::Error;
///
/// assert_eq!(Error::Error4xx(429).to_string(), "Error Code: 429");
/// assert_eq!(Error::Error4xx(429).status(), Some(429));
/// assert!(Error::NotFound.is_client_error());
/// ```
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request could not be built (malformed base URL, unencodable parameters).
    #[error("Can not build request")]
    InvalidRequest,

    /// The host is unreachable or the connection dropped mid-exchange.
    #[error("No internet connection")]
    NoInternet,

    /// HTTP 400.
    #[error("Bad request")]
    BadRequest,

    /// HTTP 401.
    #[error("Unauthorized")]
    Unauthorized,

    /// HTTP 403.
    #[error("Error Code: 403 Forbidden")]
    Forbidden,

    /// HTTP 404.
    #[error("NotFound")]
    NotFound,

    /// HTTP 402 or 405..=499.
    #[error("Error Code: {0}")]
    Error4xx(u16),

    /// HTTP 500.
    #[error("Internal server error")]
    ServerError,

    /// HTTP 501..=599.
    #[error("Error code: {0}")]
    Error5xx(u16),

    /// A successful body did not decode into the expected shape.
    #[error("decode error: {0}")]
    DecodingError(String),

    /// Any transport failure that is neither a timeout nor a lost connection.
    #[error("Request failed: {0}")]
    TransportFailed(String),

    /// The request or resource timeout expired.
    #[error("Request timed out")]
    Timeout,

    /// The response was not a recognizable HTTP response.
    #[error("unexpected error")]
    Unknown,
}

impl Error {
    /// Returns the HTTP status code this error stands for, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadRequest => Some(400),
            Error::Unauthorized => Some(401),
            Error::Forbidden => Some(403),
            Error::NotFound => Some(404),
            Error::Error4xx(code) | Error::Error5xx(code) => Some(*code),
            Error::ServerError => Some(500),
            _ => None,
        }
    }

    /// Returns `true` for errors produced by a 4xx status.
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Returns `true` for errors produced by a 5xx status.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }
}

/// A specialized `Result` type for user directory calls.
///
/// `Result<Vec<u8>>` is the outcome of one raw call.
pub type Result<T> = std::result::Result<T, Error>;
