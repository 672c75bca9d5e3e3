//! The transport seam.
//!
//! The chain driver never talks to a socket. It hands the finalized
//! [`RequestConfig`] to a [`Dispatcher`], which performs the exchange and
//! settles with exactly one [`Response`] or [`Error`]. Timeouts and
//! cancellation, when supported, are the dispatcher's concern; the chain
//! driver has no way to abort a dispatch already in flight.

use crate::config::RequestConfig;
use crate::error::Error;
use crate::interceptor::BoxFuture;
use crate::response::Response;

/// Performs the network exchange for a finalized configuration.
pub trait Dispatcher: Send + Sync {
    /// Execute the exchange described by `config`.
    ///
    /// Must settle exactly once: either the response descriptor or a
    /// transport/timeout/cancellation/status failure.
    fn dispatch(&self, config: RequestConfig) -> BoxFuture<'static, Result<Response, Error>>;
}

/// A function-based dispatcher.
///
/// Adapts a closure into a [`Dispatcher`]; the usual way to wire a real
/// transport or a test double.
///
/// # Example
///
/// ```
/// use reqchain::{FnDispatcher, Response, RequestConfig};
/// use bytes::Bytes;
/// use http::{HeaderMap, StatusCode};
///
/// let dispatcher = FnDispatcher::new(|config: RequestConfig| {
///     Box::pin(async move {
///         Ok(Response::new(
///             StatusCode::OK,
///             HeaderMap::new(),
///             Bytes::from_static(b"ok"),
///             config,
///         ))
///     })
/// });
/// ```
pub struct FnDispatcher<F> {
    func: F,
}

impl<F> FnDispatcher<F>
where
    F: Fn(RequestConfig) -> BoxFuture<'static, Result<Response, Error>> + Send + Sync,
{
    /// Create a dispatcher from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Dispatcher for FnDispatcher<F>
where
    F: Fn(RequestConfig) -> BoxFuture<'static, Result<Response, Error>> + Send + Sync,
{
    fn dispatch(&self, config: RequestConfig) -> BoxFuture<'static, Result<Response, Error>> {
        (self.func)(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    #[tokio::test]
    async fn test_fn_dispatcher_settles_with_config() {
        let dispatcher = FnDispatcher::new(|config: RequestConfig| {
            Box::pin(async move {
                Ok(Response::new(
                    StatusCode::OK,
                    HeaderMap::new(),
                    Bytes::new(),
                    config,
                ))
            })
        });

        let config = RequestConfig::new().method("get").url("/ping");
        let response = dispatcher.dispatch(config).await.unwrap();
        assert_eq!(response.config.url.as_deref(), Some("/ping"));
    }

    #[tokio::test]
    async fn test_fn_dispatcher_failure() {
        let dispatcher = FnDispatcher::new(|_config: RequestConfig| {
            Box::pin(async move { Err(Error::transport("connection refused")) })
        });

        let err = dispatcher.dispatch(RequestConfig::new()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
