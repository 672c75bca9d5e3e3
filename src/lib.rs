//! HTTP request dispatch façade with ordered interceptor pipelines.
//!
//! A [`Client`] turns a [`RequestConfig`] into a single asynchronous result
//! by running it through a mutable, ordered pipeline of request and response
//! transforms around a pluggable [`Dispatcher`] that performs the actual
//! network exchange.
//!
//! ## Dispatch pipeline
//!
//! Every call assembles an execution chain from the two interceptor
//! registries and the dispatcher:
//!
//! ```text
//! request handlers (last registered first) -> dispatch -> response handlers (registration order)
//! ```
//!
//! Each stage is an `(on_fulfilled, on_rejected)` pair. On the success path a
//! stage's `on_fulfilled` transforms the current value (the config before the
//! dispatch, the response after it); on the failure path its `on_rejected`
//! sees the error and may recover by returning a value. An absent slot passes
//! the value or error through unchanged, so a failure skips forward until
//! some stage recovers it or the chain ends. The chain is a snapshot:
//! registering or ejecting interceptors never affects a call in flight.
//!
//! ## Example
//!
//! ```
//! use reqchain::{Client, FnDispatcher, Handler, RequestConfig, Response};
//! use bytes::Bytes;
//! use http::{HeaderMap, StatusCode};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), reqchain::Error> {
//! let client = Client::new(FnDispatcher::new(|config: RequestConfig| {
//!     Box::pin(async move {
//!         Ok(Response::new(
//!             StatusCode::OK,
//!             HeaderMap::new(),
//!             Bytes::from_static(b"pong"),
//!             config,
//!         ))
//!     })
//! }));
//!
//! // Runs before every dispatch; registered last, runs first.
//! client.interceptors().request.add(Handler::map(|config: RequestConfig| {
//!     Ok(config.header("authorization", "Bearer token123"))
//! }));
//!
//! let response = client.get("/ping").await?;
//! assert_eq!(response.body, Bytes::from_static(b"pong"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! A client carries a defaults [`RequestConfig`]; each call's config is
//! merged over it (per-call scalars win, headers and params merge per key)
//! and the method is normalized to lower case, defaulting to `"get"`. Verb
//! aliases ([`Client::get`], [`Client::post`], ...) synthesize method, url,
//! and body over the per-call config.
//!
//! ## Error handling
//!
//! All failures — transport errors raised by the dispatcher and errors raised
//! by interceptor stages — flow through [`Error`]. A response-side
//! `on_rejected` handler can translate or recover them; otherwise the first
//! unrecovered failure settles the call.

mod builder;
mod chain;
mod client;
mod config;
mod dispatch;
mod error;
mod interceptor;
mod response;
mod url;

pub use builder::{BuildError, ClientBuilder};
pub use client::Client;
pub use config::{merge_config, Params, RequestConfig, RequestTarget};
pub use dispatch::{Dispatcher, FnDispatcher};
pub use error::Error;
pub use interceptor::{
    BoxFuture, Handler, InterceptorManager, Interceptors, OnFulfilled, OnRejected,
};
pub use response::Response;
pub use url::{build_url, ParamsSerializer};
