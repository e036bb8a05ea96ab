//! Maps HTTP statuses and transport failures onto [`Error`].
//!
//! Both functions are total: every status code and every
//! [`TransportError`] lands on exactly one outcome.

use crate::{transport::TransportError, Error, RawResponse, Result};

/// Maps a status code to its error, or `None` for 200..=299.
///
/// # Examples
///
/// ```
/// use hubdir::{classify::status_error, Error};
///
/// assert_eq!(status_error(204), None);
/// assert_eq!(status_error(404), Some(Error::NotFound));
/// assert_eq!(status_error(422), Some(Error::Error4xx(422)));
/// assert_eq!(status_error(0), Some(Error::Unknown));
/// ```
pub fn status_error(status: u16) -> Option<Error> {
    match status {
        200..=299 => None,
        400 => Some(Error::BadRequest),
        401 => Some(Error::Unauthorized),
        403 => Some(Error::Forbidden),
        404 => Some(Error::NotFound),
        402 | 405..=499 => Some(Error::Error4xx(status)),
        500 => Some(Error::ServerError),
        501..=599 => Some(Error::Error5xx(status)),
        _ => Some(Error::Unknown),
    }
}

/// Classifies a completed exchange: the body on 2xx, the mapped error otherwise.
pub fn classify_response(response: RawResponse) -> Result<Vec<u8>> {
    match status_error(response.status) {
        None => Ok(response.into_body()),
        Some(err) => Err(err),
    }
}

/// Maps a transport failure to its error.
pub fn transport_error(err: TransportError) -> Error {
    match err {
        TransportError::TimedOut => Error::Timeout,
        TransportError::NotConnected | TransportError::ConnectionLost => Error::NoInternet,
        TransportError::Other(detail) => Error::TransportFailed(detail),
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        transport_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[test]
    fn test_success_range_passes_body_through() {
        for status in 200..=299 {
            let body = format!("body {status}").into_bytes();
            let response = RawResponse::new(status, HeaderMap::new(), body.clone());
            assert_eq!(classify_response(response), Ok(body));
        }
    }

    #[test]
    fn test_success_ignores_body_content() {
        let response = RawResponse::new(200, HeaderMap::new(), b"not json at all".to_vec());
        assert_eq!(classify_response(response), Ok(b"not json at all".to_vec()));
    }

    #[test]
    fn test_dedicated_statuses() {
        assert_eq!(status_error(400), Some(Error::BadRequest));
        assert_eq!(status_error(401), Some(Error::Unauthorized));
        assert_eq!(status_error(403), Some(Error::Forbidden));
        assert_eq!(status_error(404), Some(Error::NotFound));
        assert_eq!(status_error(500), Some(Error::ServerError));
    }

    #[test]
    fn test_generic_4xx_preserves_code() {
        let generic = std::iter::once(402).chain(405..=499);
        for status in generic {
            assert_eq!(status_error(status), Some(Error::Error4xx(status)));
        }
    }

    #[test]
    fn test_generic_5xx_preserves_code() {
        for status in 501..=599 {
            assert_eq!(status_error(status), Some(Error::Error5xx(status)));
        }
    }

    #[test]
    fn test_out_of_range_is_unknown() {
        for status in [0, 1, 100, 101, 199, 300, 301, 304, 399, 600, 999, u16::MAX] {
            assert_eq!(status_error(status), Some(Error::Unknown), "status {status}");
        }
    }

    #[test]
    fn test_error_response_drops_body() {
        let response = RawResponse::new(503, HeaderMap::new(), b"down".to_vec());
        assert_eq!(classify_response(response), Err(Error::Error5xx(503)));
    }

    #[test]
    fn test_transport_errors() {
        assert_eq!(transport_error(TransportError::TimedOut), Error::Timeout);
        assert_eq!(transport_error(TransportError::NotConnected), Error::NoInternet);
        assert_eq!(transport_error(TransportError::ConnectionLost), Error::NoInternet);
        assert_eq!(
            Error::from(TransportError::Other("tls handshake".into())),
            Error::TransportFailed("tls handshake".into())
        );
    }
}
