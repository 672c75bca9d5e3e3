//! Response descriptor returned by a dispatch.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::config::RequestConfig;

/// The settled outcome of a network exchange.
///
/// Produced by the [`Dispatcher`](crate::Dispatcher) and handed to every
/// response-side interceptor in turn. Carries the effective configuration the
/// exchange was made with, so interceptors can correlate responses with their
/// requests.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status of the exchange.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
    /// The effective configuration this response was produced for.
    pub config: RequestConfig,
}

impl Response {
    /// Create a new response descriptor.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, config: RequestConfig) -> Self {
        Self {
            status,
            headers,
            body,
            config,
        }
    }

    /// HTTP status of the exchange.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Consume the response, returning its body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let ok = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::new(),
            RequestConfig::default(),
        );
        assert!(ok.is_success());

        let not_found = Response::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::new(),
            RequestConfig::default(),
        );
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_into_body() {
        let response = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(b"payload"),
            RequestConfig::default(),
        );
        assert_eq!(response.into_body(), Bytes::from_static(b"payload"));
    }
}
