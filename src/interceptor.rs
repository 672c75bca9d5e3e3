//! Interceptor registries for request and response transforms.
//!
//! Interceptors add cross-cutting logic to every dispatch, such as:
//! - Adding authentication headers
//! - Logging and metrics
//! - Request/response transformation
//! - Error recovery
//!
//! Each registered [`Handler`] is an `(on_fulfilled, on_rejected)` pair.
//! `on_fulfilled` transforms the success value (the config on the request
//! side, the response on the response side); `on_rejected` sees the error of
//! the preceding stage and may recover by returning `Ok`. An absent slot is
//! transparent: the value or error passes through unchanged.
//!
//! # Example
//!
//! ```
//! use reqchain::{Handler, InterceptorManager, RequestConfig};
//!
//! let manager: InterceptorManager<RequestConfig> = InterceptorManager::new();
//! let handle = manager.add(Handler::map(|config: RequestConfig| {
//!     Ok(config.header("authorization", "Bearer token123"))
//! }));
//! manager.eject(handle);
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use futures::future;

use crate::error::Error;

/// Type alias for a boxed future returning a result.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Success-path transform: receives the current payload, returns the next
/// payload or a failure.
pub type OnFulfilled<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// Failure-path transform: receives the current error and either recovers by
/// returning a payload or re-fails.
pub type OnRejected<T> = Arc<dyn Fn(Error) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// One registered interceptor: an optional fulfilled transform paired with an
/// optional rejected transform.
pub struct Handler<T> {
    pub(crate) on_fulfilled: Option<OnFulfilled<T>>,
    pub(crate) on_rejected: Option<OnRejected<T>>,
}

impl<T> Clone for Handler<T> {
    fn clone(&self) -> Self {
        Self {
            on_fulfilled: self.on_fulfilled.clone(),
            on_rejected: self.on_rejected.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("on_fulfilled", &self.on_fulfilled.is_some())
            .field("on_rejected", &self.on_rejected.is_some())
            .finish()
    }
}

impl<T: Send + 'static> Handler<T> {
    /// Create a handler from raw transform slots. `None` means pass-through
    /// on that path.
    pub fn new(on_fulfilled: Option<OnFulfilled<T>>, on_rejected: Option<OnRejected<T>>) -> Self {
        Self {
            on_fulfilled,
            on_rejected,
        }
    }

    /// Handler with only a synchronous success transform.
    pub fn map<F>(f: F) -> Self
    where
        F: Fn(T) -> Result<T, Error> + Send + Sync + 'static,
    {
        Self {
            on_fulfilled: Some(Arc::new(move |value| Box::pin(future::ready(f(value))))),
            on_rejected: None,
        }
    }

    /// Handler with only a synchronous failure transform.
    pub fn catch<F>(f: F) -> Self
    where
        F: Fn(Error) -> Result<T, Error> + Send + Sync + 'static,
    {
        Self {
            on_fulfilled: None,
            on_rejected: Some(Arc::new(move |error| Box::pin(future::ready(f(error))))),
        }
    }

    /// Attach a synchronous failure transform to this handler.
    pub fn and_catch<F>(mut self, f: F) -> Self
    where
        F: Fn(Error) -> Result<T, Error> + Send + Sync + 'static,
    {
        self.on_rejected = Some(Arc::new(move |error| Box::pin(future::ready(f(error)))));
        self
    }
}

/// Ordered registry of interceptor handlers.
///
/// Handlers are indexed by the stable handle `add` returns. Ejected slots are
/// nulled, never removed, so earlier handles stay valid and enumeration order
/// never shifts. Registration goes through `&self`; mutations become visible
/// to the next chain assembly and never affect one already in flight.
pub struct InterceptorManager<T> {
    handlers: RwLock<Vec<Option<Handler<T>>>>,
}

impl<T> Default for InterceptorManager<T> {
    fn default() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }
}

impl<T> std::fmt::Debug for InterceptorManager<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorManager")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> InterceptorManager<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning its handle for later [`eject`](Self::eject).
    pub fn add(&self, handler: Handler<T>) -> usize {
        let mut handlers = write_lock(&self.handlers);
        handlers.push(Some(handler));
        handlers.len() - 1
    }

    /// Remove the handler registered under `handle`.
    ///
    /// Idempotent: ejecting an already-ejected or unknown handle is a no-op.
    pub fn eject(&self, handle: usize) {
        let mut handlers = write_lock(&self.handlers);
        if let Some(slot) = handlers.get_mut(handle) {
            *slot = None;
        }
    }

    /// Visit every live handler in ascending registration order, skipping
    /// ejected slots.
    pub fn for_each(&self, mut visit: impl FnMut(&Handler<T>)) {
        let handlers = read_lock(&self.handlers);
        for handler in handlers.iter().flatten() {
            visit(handler);
        }
    }

    /// Number of live handlers.
    pub fn len(&self) -> usize {
        read_lock(&self.handlers).iter().flatten().count()
    }

    /// Whether the registry has no live handlers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Lock poisoning only happens if a registering thread panicked; the vec is
// still structurally sound, so keep serving it.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// The two registries owned by a [`Client`](crate::Client): request-side
/// handlers transform the outgoing [`RequestConfig`](crate::RequestConfig),
/// response-side handlers transform the [`Response`](crate::Response).
#[derive(Debug, Default)]
pub struct Interceptors {
    /// Request-side registry. Handlers registered later run earlier (LIFO).
    pub request: InterceptorManager<crate::config::RequestConfig>,
    /// Response-side registry. Handlers run in registration order (FIFO).
    pub response: InterceptorManager<crate::response::Response>,
}

impl Interceptors {
    /// Create a pair of empty registries.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RequestConfig;

    #[test]
    fn test_add_returns_sequential_handles() {
        let manager: InterceptorManager<RequestConfig> = InterceptorManager::new();
        assert_eq!(manager.add(Handler::map(Ok)), 0);
        assert_eq!(manager.add(Handler::map(Ok)), 1);
        assert_eq!(manager.add(Handler::map(Ok)), 2);
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_handles_stable_after_eject() {
        let manager: InterceptorManager<RequestConfig> = InterceptorManager::new();
        let first = manager.add(Handler::map(Ok));
        let _second = manager.add(Handler::map(Ok));
        manager.eject(first);
        // Handles keep counting from the underlying slot index
        assert_eq!(manager.add(Handler::map(Ok)), 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_eject_is_idempotent() {
        let manager: InterceptorManager<RequestConfig> = InterceptorManager::new();
        let handle = manager.add(Handler::map(Ok));
        manager.eject(handle);
        manager.eject(handle);
        manager.eject(999);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_for_each_skips_ejected() {
        let manager: InterceptorManager<RequestConfig> = InterceptorManager::new();
        manager.add(Handler::map(|c: RequestConfig| Ok(c.header("x-seen", "a"))));
        let ejected = manager.add(Handler::map(|c: RequestConfig| Ok(c.header("x-seen", "b"))));
        manager.add(Handler::map(|c: RequestConfig| Ok(c.header("x-seen", "c"))));
        manager.eject(ejected);

        let mut visited = 0;
        manager.for_each(|_| visited += 1);
        assert_eq!(visited, 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_handler_pass_through_slots() {
        let fulfilled_only: Handler<RequestConfig> = Handler::map(Ok);
        assert!(fulfilled_only.on_fulfilled.is_some());
        assert!(fulfilled_only.on_rejected.is_none());

        let rejected_only: Handler<RequestConfig> = Handler::catch(Err);
        assert!(rejected_only.on_fulfilled.is_none());
        assert!(rejected_only.on_rejected.is_some());

        let both: Handler<RequestConfig> = Handler::map(Ok).and_catch(Err);
        assert!(both.on_fulfilled.is_some());
        assert!(both.on_rejected.is_some());
    }
}
