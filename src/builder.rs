//! Client builder.
//!
//! Provides a fluent API for configuring and building a [`Client`].

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderName, HeaderValue};

use crate::client::Client;
use crate::config::RequestConfig;
use crate::dispatch::Dispatcher;
use crate::interceptor::Interceptors;

/// Builder for creating a [`Client`].
///
/// A dispatcher is required; everything else seeds the client's defaults
/// configuration.
///
/// # Example
///
/// ```ignore
/// use reqchain::{Client, RequestConfig};
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .dispatcher(my_dispatcher)
///     .base_url("http://localhost:3000")
///     .header("user-agent", "reqchain")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct ClientBuilder {
    dispatcher: Option<Arc<dyn Dispatcher>>,
    defaults: RequestConfig,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("dispatcher", &self.dispatcher.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a builder with empty defaults and no dispatcher.
    pub fn new() -> Self {
        Self {
            dispatcher: None,
            defaults: RequestConfig::default(),
        }
    }

    /// Set the dispatcher performing the network exchange.
    pub fn dispatcher<D: Dispatcher + 'static>(mut self, dispatcher: D) -> Self {
        self.dispatcher = Some(Arc::new(dispatcher));
        self
    }

    /// Set the dispatcher from a shared handle.
    pub fn dispatcher_arc(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Replace the defaults configuration wholesale.
    pub fn defaults(mut self, defaults: RequestConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the default base URL.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.defaults.base_url = Some(base_url.into());
        self
    }

    /// Set the default HTTP method.
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        self.defaults.method = Some(method.into());
        self
    }

    /// Add a default header, sent with every request unless the per-call
    /// config overrides that name.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        K::Error: std::fmt::Debug,
        V: TryInto<HeaderValue>,
        V::Error: std::fmt::Debug,
    {
        let name = name.try_into().expect("invalid header name");
        let value = value.try_into().expect("invalid header value");
        self.defaults.headers.insert(name, value);
        self
    }

    /// Set the default timeout, observed by the dispatcher.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.defaults.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingDispatcher`] if no dispatcher was set.
    pub fn build(self) -> Result<Client, BuildError> {
        let dispatcher = self.dispatcher.ok_or(BuildError::MissingDispatcher)?;
        Ok(Client::from_parts(
            self.defaults,
            Interceptors::new(),
            dispatcher,
        ))
    }
}

/// Error type for client building failures.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// No dispatcher was configured.
    #[error("a dispatcher is required to build a client")]
    MissingDispatcher,
}
