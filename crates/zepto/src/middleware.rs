//! Handler adapters and their composition.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::future::FutureExt;
use tracing::{info, warn};

use crate::handler::{Handler, HandlerResult};
use crate::request::Request;

/// A transformation wrapping a handler with cross-cutting behavior.
///
/// `wrap` runs once, when a route is registered; the handler it returns is
/// what the routing table stores. Any state an adapter needs per request
/// (timers, counters) lives inside the returned handler.
///
/// Plain closures `Fn(Handler) -> Handler` are adapters too.
///
/// # Example
///
/// ```
/// use zepto::{from_fn, Handler, Middleware, Request, Response};
///
/// let tag = from_fn(|req: Request, next: Handler| async move {
///     let res = next(req).await?;
///     Ok(res.header("X-Served-By", "zepto"))
/// });
/// # fn assert_middleware(_: &impl Middleware) {}
/// # assert_middleware(&tag);
/// ```
pub trait Middleware: Send + Sync {
    /// Returns a handler that runs around `next`.
    fn wrap(&self, next: Handler) -> Handler;
}

impl<F> Middleware for F
where
    F: Fn(Handler) -> Handler + Send + Sync,
{
    fn wrap(&self, next: Handler) -> Handler {
        self(next)
    }
}

/// Builds an adapter from an async function receiving the request and the
/// next handler in the chain.
pub fn from_fn<F, Fut>(f: F) -> impl Middleware
where
    F: Fn(Request, Handler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    let f = Arc::new(f);
    move |next: Handler| -> Handler {
        let f = Arc::clone(&f);
        Arc::new(move |req: Request| f(req, Arc::clone(&next)).boxed())
    }
}

/// Ordered list of adapters.
///
/// The first adapter added is the outermost: it sees the request before any
/// other adapter and the response after all of them.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an adapter; it runs inside every adapter already present.
    pub fn push(&mut self, middleware: impl Middleware + 'static) {
        self.layers.push(Arc::new(middleware));
    }

    /// Appends an adapter, builder style.
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.push(middleware);
        self
    }

    /// Number of adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the chain has no adapter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Wraps `handler` with every adapter, producing one composed handler.
    #[must_use]
    pub fn compose(&self, handler: Handler) -> Handler {
        self.layers
            .iter()
            .rev()
            .fold(handler, |next, layer| layer.wrap(next))
    }
}

/// Logs one event per request with method, path, status and latency.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger;

impl Middleware for Logger {
    fn wrap(&self, next: Handler) -> Handler {
        Arc::new(move |req: Request| {
            let next = Arc::clone(&next);
            async move {
                let method = req.method;
                let path = req.path.clone();
                let start = Instant::now();
                let result = next(req).await;
                let elapsed = start.elapsed();
                match &result {
                    Ok(res) => info!(%method, %path, status = res.status, ?elapsed, "served"),
                    Err(err) => warn!(%method, %path, error = %err, ?elapsed, "handler failed"),
                }
                result
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::handler::handler_fn;
    use crate::response::Response;

    type Trace = Arc<Mutex<Vec<String>>>;

    fn recorder(name: &'static str, trace: Trace) -> impl Middleware {
        from_fn(move |req: Request, next: Handler| {
            let trace = Arc::clone(&trace);
            async move {
                trace.lock().unwrap().push(format!("{name}-before"));
                let res = next(req).await;
                trace.lock().unwrap().push(format!("{name}-after"));
                res
            }
        })
    }

    #[tokio::test]
    async fn test_onion_order() {
        let trace = Trace::default();
        let inner = Arc::clone(&trace);
        let handler = handler_fn(move |_req: Request| {
            let trace = Arc::clone(&inner);
            async move {
                trace.lock().unwrap().push("H".to_string());
                Ok(Response::ok())
            }
        });

        let chain = Chain::new()
            .with(recorder("A", Arc::clone(&trace)))
            .with(recorder("B", Arc::clone(&trace)));
        let composed = chain.compose(handler);
        assert!(trace.lock().unwrap().is_empty());

        composed(Request::get("/")).await.unwrap();
        assert_eq!(
            *trace.lock().unwrap(),
            ["A-before", "B-before", "H", "B-after", "A-after"]
        );
    }

    #[tokio::test]
    async fn test_empty_chain_returns_handler() {
        let handler = handler_fn(|_req: Request| async { Ok(Response::text("plain")) });
        let composed = Chain::new().compose(Arc::clone(&handler));
        assert!(Arc::ptr_eq(&handler, &composed));
    }

    #[tokio::test]
    async fn test_closure_adapter_can_short_circuit() {
        let deny = |_next: Handler| -> Handler {
            handler_fn(|_req: Request| async { Ok(Response::new(401)) })
        };
        let handler = handler_fn(|_req: Request| async { Ok(Response::ok()) });
        let composed = Chain::new().with(deny).compose(handler);
        assert_eq!(composed(Request::get("/")).await.unwrap().status, 401);
    }

    #[tokio::test]
    async fn test_logger_passes_result_through() {
        let handler = handler_fn(|_req: Request| async { Ok(Response::text("ok")) });
        let composed = Logger.wrap(handler);
        let res = composed(Request::get("/ping")).await.unwrap();
        assert_eq!(res.body_string(), Some("ok".to_string()));
    }
}
