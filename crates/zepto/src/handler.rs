//! Handler types.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::error::HandlerError;
use crate::request::Request;
use crate::response::Response;

/// What a handler resolves to: a response, or a failure rendered as 500.
pub type HandlerResult = Result<Response, HandlerError>;

/// A type-erased async handler, as stored in the routing table.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Boxes an async function into a [`Handler`].
///
/// # Example
///
/// ```
/// use zepto::{handler_fn, Request, Response};
///
/// let hello = handler_fn(|req: Request| async move {
///     Ok(Response::text(format!("Hello, {}!", req.param("name"))))
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |req| f(req).boxed())
}
