//! The request dispatch façade.
//!
//! A [`Client`] owns a defaults configuration, the two interceptor
//! registries, and a [`Dispatcher`]. Every call merges its configuration with
//! the defaults, snapshots the registries into an execution chain, and drives
//! the chain to a single settled outcome.

use std::sync::Arc;

use bytes::Bytes;

use crate::builder::ClientBuilder;
use crate::chain::ExecutionChain;
use crate::config::{merge_config, RequestConfig, RequestTarget};
use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::interceptor::Interceptors;
use crate::response::Response;
use crate::url::build_url;

/// HTTP request dispatch façade with interceptor pipelines.
///
/// # Example
///
/// ```ignore
/// use reqchain::{Client, Handler, RequestConfig};
///
/// let client = Client::builder()
///     .dispatcher(my_dispatcher)
///     .base_url("http://localhost:3000")
///     .build()?;
///
/// client.interceptors().request.add(Handler::map(|config: RequestConfig| {
///     Ok(config.header("authorization", "Bearer token123"))
/// }));
///
/// let response = client.get("/users").await?;
/// ```
///
/// Request-side interceptors run nearest-registration-first (the one added
/// last runs first); response-side interceptors run in registration order.
/// Registering or ejecting interceptors never affects a call already in
/// flight.
pub struct Client {
    defaults: RequestConfig,
    interceptors: Interceptors,
    dispatcher: Arc<dyn Dispatcher>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("defaults", &self.defaults)
            .field("interceptors", &self.interceptors)
            .finish()
    }
}

impl Client {
    /// Create a builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with empty defaults.
    pub fn new<D: Dispatcher + 'static>(dispatcher: D) -> Self {
        Self::from_parts(RequestConfig::default(), Interceptors::new(), Arc::new(dispatcher))
    }

    pub(crate) fn from_parts(
        defaults: RequestConfig,
        interceptors: Interceptors,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            defaults,
            interceptors,
            dispatcher,
        }
    }

    /// The client's defaults configuration.
    pub fn defaults(&self) -> &RequestConfig {
        &self.defaults
    }

    /// The request and response interceptor registries.
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Create a derived client: this client's defaults merged with `config`,
    /// the same dispatcher, and fresh empty interceptor registries.
    pub fn derive(&self, config: RequestConfig) -> Client {
        Client::from_parts(
            merge_config(&self.defaults, config),
            Interceptors::new(),
            self.dispatcher.clone(),
        )
    }

    /// Dispatch a request described by a bare URL or a full configuration.
    ///
    /// ```ignore
    /// client.request("/users").await?;
    /// client.request(RequestConfig::new().method("post").url("/users")).await?;
    /// ```
    pub async fn request<T: Into<RequestTarget>>(&self, target: T) -> Result<Response, Error> {
        self.request_with(target, RequestConfig::default()).await
    }

    /// Dispatch a request with an explicit per-call configuration.
    ///
    /// When `target` is a URL it overwrites `config.url`. When `target` is
    /// already a full configuration, `config` is ignored in its favor.
    pub async fn request_with<T: Into<RequestTarget>>(
        &self,
        target: T,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        let config = match target.into() {
            RequestTarget::Url(url) => {
                let mut config = config;
                config.url = Some(url);
                config
            }
            RequestTarget::Config(config) => *config,
        };
        self.execute(config).await
    }

    /// Merge, normalize, assemble the chain, and drive it to settlement.
    async fn execute(&self, config: RequestConfig) -> Result<Response, Error> {
        let mut config = merge_config(&self.defaults, config);
        // Per-call method wins over the default through the merge; absent
        // both, the read verb applies.
        config.method = Some(match config.method.take() {
            Some(method) => method.to_ascii_lowercase(),
            None => "get".to_string(),
        });

        let chain = ExecutionChain::assemble(&self.interceptors);
        tracing::debug!(
            method = config.method.as_deref().unwrap_or_default(),
            url = config.url.as_deref().unwrap_or_default(),
            stages = chain.len(),
            "dispatching request"
        );
        chain.drive(config, self.dispatcher.as_ref()).await
    }

    /// Render the URL a configuration would be dispatched to, without
    /// dispatching. Merges the defaults first; a leading `?` left by an empty
    /// URL is stripped.
    pub fn get_uri(&self, config: RequestConfig) -> String {
        let merged = merge_config(&self.defaults, config);
        let url = merged.url.unwrap_or_default();
        let rendered = build_url(
            &url,
            merged.params.as_deref(),
            merged.params_serializer.as_ref(),
        );
        match rendered.strip_prefix('?') {
            Some(stripped) => stripped.to_string(),
            None => rendered,
        }
    }

    async fn verb(
        &self,
        method: &'static str,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        // The synthesized method and url win over same-named keys in config
        self.execute(RequestConfig {
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            ..config
        })
        .await
    }

    async fn body_verb(
        &self,
        method: &'static str,
        url: &str,
        data: Option<Bytes>,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        // data wins even when absent, matching the synthesized-object
        // override of the entry point contract
        self.execute(RequestConfig {
            method: Some(method.to_string()),
            url: Some(url.to_string()),
            data,
            ..config
        })
        .await
    }

    /// `GET` the given URL.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.verb("get", url, RequestConfig::default()).await
    }

    /// `GET` with a per-call configuration.
    pub async fn get_with(&self, url: &str, config: RequestConfig) -> Result<Response, Error> {
        self.verb("get", url, config).await
    }

    /// `DELETE` the given URL.
    pub async fn delete(&self, url: &str) -> Result<Response, Error> {
        self.verb("delete", url, RequestConfig::default()).await
    }

    /// `DELETE` with a per-call configuration.
    pub async fn delete_with(&self, url: &str, config: RequestConfig) -> Result<Response, Error> {
        self.verb("delete", url, config).await
    }

    /// `HEAD` the given URL.
    pub async fn head(&self, url: &str) -> Result<Response, Error> {
        self.verb("head", url, RequestConfig::default()).await
    }

    /// `HEAD` with a per-call configuration.
    pub async fn head_with(&self, url: &str, config: RequestConfig) -> Result<Response, Error> {
        self.verb("head", url, config).await
    }

    /// `OPTIONS` the given URL.
    pub async fn options(&self, url: &str) -> Result<Response, Error> {
        self.verb("options", url, RequestConfig::default()).await
    }

    /// `OPTIONS` with a per-call configuration.
    pub async fn options_with(&self, url: &str, config: RequestConfig) -> Result<Response, Error> {
        self.verb("options", url, config).await
    }

    /// `POST` a body to the given URL.
    pub async fn post<B: Into<Bytes>>(&self, url: &str, data: B) -> Result<Response, Error> {
        self.body_verb("post", url, Some(data.into()), RequestConfig::default())
            .await
    }

    /// `POST` with an optional body and a per-call configuration.
    pub async fn post_with(
        &self,
        url: &str,
        data: Option<Bytes>,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        self.body_verb("post", url, data, config).await
    }

    /// `PUT` a body to the given URL.
    pub async fn put<B: Into<Bytes>>(&self, url: &str, data: B) -> Result<Response, Error> {
        self.body_verb("put", url, Some(data.into()), RequestConfig::default())
            .await
    }

    /// `PUT` with an optional body and a per-call configuration.
    pub async fn put_with(
        &self,
        url: &str,
        data: Option<Bytes>,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        self.body_verb("put", url, data, config).await
    }

    /// `PATCH` a body to the given URL.
    pub async fn patch<B: Into<Bytes>>(&self, url: &str, data: B) -> Result<Response, Error> {
        self.body_verb("patch", url, Some(data.into()), RequestConfig::default())
            .await
    }

    /// `PATCH` with an optional body and a per-call configuration.
    pub async fn patch_with(
        &self,
        url: &str,
        data: Option<Bytes>,
        config: RequestConfig,
    ) -> Result<Response, Error> {
        self.body_verb("patch", url, data, config).await
    }
}
