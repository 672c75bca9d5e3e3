//! Per-request configuration and merge rules.
//!
//! A [`RequestConfig`] describes one request. A client carries a defaults
//! config; every call supplies its own, and [`merge_config`] combines the two
//! into the effective configuration handed to the interceptor chain: per-call
//! scalars win over defaults, headers and params are merged per key.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::url::ParamsSerializer;

/// Ordered query parameters. Order is preserved through merging and
/// serialization.
pub type Params = Vec<(String, String)>;

/// Configuration for a single request.
///
/// Every field is optional so that a defaults config and a per-call config
/// can be merged field by field. Built either literally or with the fluent
/// setters:
///
/// ```
/// use reqchain::RequestConfig;
/// use std::time::Duration;
///
/// let config = RequestConfig::new()
///     .method("post")
///     .url("/users")
///     .header("x-request-id", "abc-123")
///     .param("page", "2")
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Clone, Default)]
pub struct RequestConfig {
    /// HTTP method. Normalized to lower case before dispatch; defaults to
    /// `"get"` when neither the call nor the client defaults set one.
    pub method: Option<String>,
    /// Request URL, absolute or relative to `base_url`.
    pub url: Option<String>,
    /// Base URL prepended by the dispatcher when `url` is relative.
    pub base_url: Option<String>,
    /// Request headers. Merged per name, per-call value winning.
    pub headers: HeaderMap,
    /// Query parameters, serialized into the URL at dispatch time.
    pub params: Option<Params>,
    /// Raw request body.
    pub data: Option<Bytes>,
    /// Deadline for the exchange. Observed by the dispatcher, not by the
    /// chain driver.
    pub timeout: Option<Duration>,
    /// Custom query serialization strategy. When absent, params are
    /// form-urlencoded.
    pub params_serializer: Option<ParamsSerializer>,
}

impl std::fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestConfig")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("data", &self.data)
            .field("timeout", &self.timeout)
            .field("params_serializer", &self.params_serializer.is_some())
            .finish()
    }
}

impl RequestConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the request URL.
    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the base URL.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header.
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
        self.headers.insert(name, value);
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Append a query parameter.
    pub fn param<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Replace all query parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the request body.
    pub fn data<B: Into<Bytes>>(mut self, data: B) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom query serializer.
    pub fn params_serializer(mut self, serializer: ParamsSerializer) -> Self {
        self.params_serializer = Some(serializer);
        self
    }
}

/// Merge a defaults configuration with a per-call configuration.
///
/// Deterministic, per key: scalars take the per-call value when present and
/// fall back to the default otherwise; headers start from the defaults and
/// are overridden per name by the call; params keep the defaults' order,
/// with call pairs replacing same-named defaults and new names appended in
/// call order.
pub fn merge_config(defaults: &RequestConfig, call: RequestConfig) -> RequestConfig {
    let mut headers = defaults.headers.clone();
    for name in call
        .headers
        .keys()
        .cloned()
        .collect::<Vec<HeaderName>>()
    {
        // insert replaces every default value for that name with the
        // per-call ones, including multi-valued headers
        headers.remove(&name);
        for value in call.headers.get_all(&name) {
            headers.append(name.clone(), value.clone());
        }
    }

    let params = merge_params(defaults.params.as_deref(), call.params);

    RequestConfig {
        method: call.method.or_else(|| defaults.method.clone()),
        url: call.url.or_else(|| defaults.url.clone()),
        base_url: call.base_url.or_else(|| defaults.base_url.clone()),
        headers,
        params,
        data: call.data.or_else(|| defaults.data.clone()),
        timeout: call.timeout.or(defaults.timeout),
        params_serializer: call
            .params_serializer
            .or_else(|| defaults.params_serializer.clone()),
    }
}

fn merge_params(defaults: Option<&[(String, String)]>, call: Option<Params>) -> Option<Params> {
    match (defaults, call) {
        (None, call) => call,
        (Some(defaults), None) => Some(defaults.to_vec()),
        (Some(defaults), Some(call)) => {
            let mut merged: Params = defaults
                .iter()
                .filter(|(name, _)| !call.iter().any(|(n, _)| n == name))
                .cloned()
                .collect();
            merged.extend(call);
            Some(merged)
        }
    }
}

/// Target of a [`request`](crate::Client::request) call: either a bare URL
/// or a full configuration, mirroring the `request(url, config?)` /
/// `request(config)` dual calling form.
#[derive(Debug, Clone)]
pub enum RequestTarget {
    /// A bare URL; combined with a separate per-call configuration.
    Url(String),
    /// A full per-call configuration.
    Config(Box<RequestConfig>),
}

impl From<&str> for RequestTarget {
    fn from(url: &str) -> Self {
        RequestTarget::Url(url.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(url: String) -> Self {
        RequestTarget::Url(url)
    }
}

impl From<RequestConfig> for RequestTarget {
    fn from(config: RequestConfig) -> Self {
        RequestTarget::Config(Box::new(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let config = RequestConfig::new()
            .method("post")
            .url("/users")
            .header("x-request-id", "abc-123")
            .param("page", "2")
            .data("body")
            .timeout(Duration::from_secs(5));

        assert_eq!(config.method.as_deref(), Some("post"));
        assert_eq!(config.url.as_deref(), Some("/users"));
        assert_eq!(config.headers.get("x-request-id").unwrap(), "abc-123");
        assert_eq!(
            config.params,
            Some(vec![("page".to_string(), "2".to_string())])
        );
        assert_eq!(config.data, Some(Bytes::from_static(b"body")));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_merge_scalar_call_wins() {
        let defaults = RequestConfig::new()
            .method("get")
            .base_url("http://localhost:3000")
            .timeout(Duration::from_secs(30));
        let call = RequestConfig::new().method("POST").url("/users");

        let merged = merge_config(&defaults, call);
        assert_eq!(merged.method.as_deref(), Some("POST"));
        assert_eq!(merged.url.as_deref(), Some("/users"));
        assert_eq!(merged.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(merged.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_merge_headers_per_name() {
        let defaults = RequestConfig::new()
            .header("accept", "application/json")
            .header("x-client", "default");
        let call = RequestConfig::new().header("x-client", "override");

        let merged = merge_config(&defaults, call);
        assert_eq!(merged.headers.get("accept").unwrap(), "application/json");
        assert_eq!(merged.headers.get("x-client").unwrap(), "override");
        assert_eq!(merged.headers.get_all("x-client").iter().count(), 1);
    }

    #[test]
    fn test_merge_params_per_key() {
        let defaults = RequestConfig::new().param("page", "1").param("limit", "10");
        let call = RequestConfig::new().param("page", "3").param("sort", "name");

        let merged = merge_config(&defaults, call);
        assert_eq!(
            merged.params,
            Some(vec![
                ("limit".to_string(), "10".to_string()),
                ("page".to_string(), "3".to_string()),
                ("sort".to_string(), "name".to_string()),
            ])
        );
    }

    #[test]
    fn test_merge_empty_call_keeps_defaults() {
        let defaults = RequestConfig::new().method("put").url("/things");
        let merged = merge_config(&defaults, RequestConfig::new());
        assert_eq!(merged.method.as_deref(), Some("put"));
        assert_eq!(merged.url.as_deref(), Some("/things"));
    }

    #[test]
    fn test_request_target_from() {
        assert!(matches!(
            RequestTarget::from("/users"),
            RequestTarget::Url(url) if url == "/users"
        ));
        assert!(matches!(
            RequestTarget::from(RequestConfig::new().url("/users")),
            RequestTarget::Config(_)
        ));
    }
}
