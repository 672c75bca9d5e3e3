//! Per-call execution chain: request handlers, the dispatch, response
//! handlers, driven as one asynchronous computation.

use crate::config::RequestConfig;
use crate::dispatch::Dispatcher;
use crate::error::Error;
use crate::interceptor::{Handler, Interceptors};
use crate::response::Response;

/// Snapshot of both registries taken at assembly time.
///
/// Request handlers are stored nearest-registration-first (the handler
/// registered last runs first), response handlers in registration order, with
/// the dispatch stage between the two segments. Once assembled the chain is
/// immutable: later registry mutations never affect an in-flight call. The
/// stages are iterated by index, never drained.
pub(crate) struct ExecutionChain {
    request: Vec<Handler<RequestConfig>>,
    response: Vec<Handler<Response>>,
}

impl ExecutionChain {
    /// Snapshot the live handlers of both registries.
    pub(crate) fn assemble(interceptors: &Interceptors) -> Self {
        let mut request = Vec::new();
        interceptors.request.for_each(|handler| request.push(handler.clone()));
        // Enumeration yields ascending registration order; reversing gives
        // the last-registered-first order the request segment runs in.
        request.reverse();

        let mut response = Vec::new();
        interceptors
            .response
            .for_each(|handler| response.push(handler.clone()));

        Self { request, response }
    }

    /// Total number of `(on_fulfilled, on_rejected)` slots: every handler and
    /// the dispatch stage contribute one pair each.
    pub(crate) fn len(&self) -> usize {
        2 * (self.request.len() + self.response.len() + 1)
    }

    /// Drive the chain to settlement.
    ///
    /// Seeds the computation with the effective configuration, folds it
    /// through the request segment, runs the dispatch on a success state
    /// (the dispatch pair has no rejected slot, so an error skips it
    /// untouched), then folds the outcome through the response segment.
    pub(crate) async fn drive(
        self,
        config: RequestConfig,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Response, Error> {
        let mut state: Result<RequestConfig, Error> = Ok(config);
        for stage in &self.request {
            state = step(stage, state).await;
        }

        let mut outcome: Result<Response, Error> = match state {
            Ok(config) => dispatcher.dispatch(config).await,
            Err(error) => Err(error),
        };
        for stage in &self.response {
            outcome = step(stage, outcome).await;
        }
        outcome
    }
}

/// Run one stage. On the success path an absent `on_fulfilled` passes the
/// value through unchanged; on the failure path an absent `on_rejected`
/// propagates the error unchanged. A present `on_rejected` may recover by
/// returning `Ok`.
async fn step<T>(handler: &Handler<T>, state: Result<T, Error>) -> Result<T, Error> {
    match state {
        Ok(value) => match &handler.on_fulfilled {
            Some(on_fulfilled) => on_fulfilled(value).await,
            None => Ok(value),
        },
        Err(error) => match &handler.on_rejected {
            Some(on_rejected) => on_rejected(error).await,
            None => Err(error),
        },
    }
}
