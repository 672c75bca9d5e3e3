//! Error types for request dispatch.
//!
//! This module provides [`Error`], the error type flowing through interceptor
//! chains. Errors are `Clone` so a recovered error can be inspected again by
//! later stages without consuming it.

use http::StatusCode;

use crate::response::Response;

/// Error produced by a dispatch or raised by an interceptor stage.
///
/// Transport-level variants (`Transport`, `Timeout`, `Canceled`, `Status`)
/// originate from the [`Dispatcher`](crate::Dispatcher); the chain driver
/// never creates them itself. `Status` carries the full response so a
/// response-side `on_rejected` handler can recover from a non-2xx outcome.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level error (connection failed, DNS, TLS, etc.).
    #[error("transport error: {0}")]
    Transport(String),

    /// The configured timeout elapsed before the exchange settled.
    #[error("request timed out")]
    Timeout,

    /// The request was canceled by the caller before settling.
    #[error("request canceled")]
    Canceled,

    /// The server answered with a status the dispatcher treats as failure.
    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        response: Box<Response>,
    },

    /// Invalid or missing configuration (bad URL, missing method, etc.).
    #[error("invalid request config: {0}")]
    Config(String),

    /// An interceptor stage raised instead of returning a value.
    #[error("interceptor error: {0}")]
    Interceptor(String),
}

impl Error {
    /// Create a transport error.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Error::Transport(message.into())
    }

    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Create an interceptor error.
    pub fn interceptor<S: Into<String>>(message: S) -> Self {
        Error::Interceptor(message.into())
    }

    /// Create a status error from a failed response.
    pub fn status(response: Response) -> Self {
        Error::Status {
            status: response.status,
            response: Box::new(response),
        }
    }

    /// Whether this error represents caller-initiated cancellation.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Error::Canceled)
    }

    /// The response attached to a `Status` error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;

    use crate::config::RequestConfig;

    #[test]
    fn test_status_error_carries_response() {
        let response = Response::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::from_static(b"missing"),
            RequestConfig::default(),
        );
        let err = Error::status(response);

        assert!(matches!(err, Error::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert_eq!(err.response().unwrap().body, Bytes::from_static(b"missing"));
    }

    #[test]
    fn test_is_canceled() {
        assert!(Error::Canceled.is_canceled());
        assert!(!Error::Timeout.is_canceled());
        assert!(!Error::transport("connection reset").is_canceled());
    }

    #[test]
    fn test_response_accessor_non_status() {
        assert!(Error::Timeout.response().is_none());
        assert!(Error::interceptor("boom").response().is_none());
    }
}
