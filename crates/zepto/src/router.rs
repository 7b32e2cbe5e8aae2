//! Route registration and request dispatch.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::backend::Backend;
use crate::error::{Result, RouterError};
use crate::handler::{handler_fn, Handler, HandlerResult};
use crate::middleware::{Chain, Middleware};
use crate::path::join;
use crate::request::{Method, PathParams, Request};
use crate::response::Response;
use crate::table::{RouteMatch, RoutingTable};

/// A group of routes sharing a path prefix and, optionally, middleware.
///
/// Middleware added to a group wraps the routes added to the group after
/// it, inside any router-level middleware. Groups nest: a sub-group's
/// routes get the parent's prefix prepended.
pub struct RouteGroup {
    prefix: String,
    routes: Vec<(Method, String, Handler)>,
    middleware: Chain,
}

impl RouteGroup {
    /// Creates a new route group with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            routes: Vec::new(),
            middleware: Chain::new(),
        }
    }

    /// Returns the group prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Adds middleware for the routes added after this call.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(mw);
        self
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut>(self, method: Method, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler(method, path, handler_fn(handler))
    }

    /// Adds an already boxed handler.
    #[must_use]
    pub fn handler(mut self, method: Method, path: &str, handler: Handler) -> Self {
        let full_path = join(&self.prefix, path);
        let handler = self.middleware.compose(handler);
        self.routes.push((method, full_path, handler));
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Put, path, handler)
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Patch, path, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Delete, path, handler)
    }

    /// Nests `group` under this group's prefix and current middleware.
    #[must_use]
    pub fn group(mut self, group: RouteGroup) -> Self {
        for (method, path, handler) in group.routes {
            let full_path = join(&self.prefix, &path);
            let handler = self.middleware.compose(handler);
            self.routes.push((method, full_path, handler));
        }
        self
    }

    /// Number of routes collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the group has no route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects routes and middleware, then freezes them into a [`Router`].
///
/// Router-level middleware wraps the routes registered after it was added;
/// the composition happens here, once, not per request. Routes are stored
/// in a [`RoutingTable`] unless another [`Backend`] is supplied with
/// [`RouterBuilder::with_backend`].
pub struct RouterBuilder<T = RoutingTable<Handler>> {
    table: T,
    middleware: Chain,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::with_backend(RoutingTable::new())
    }
}

impl RouterBuilder {
    /// Creates an empty builder backed by a [`RoutingTable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Backend<Handler>> RouterBuilder<T> {
    /// Creates a builder storing its routes in `table`.
    ///
    /// Routes already present in `table` are served as they are, without
    /// router middleware.
    #[must_use]
    pub fn with_backend(table: T) -> Self {
        Self {
            table,
            middleware: Chain::new(),
        }
    }

    /// Adds middleware for the routes registered after this call.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.middleware.push(mw);
        self
    }

    /// Registers an already boxed handler.
    pub fn handler(mut self, method: Method, path: &str, handler: Handler) -> Result<Self> {
        let handler = self.middleware.compose(handler);
        self.table.register(method, path, handler)?;
        Ok(self)
    }

    /// Adds a route with any method.
    pub fn route<F, Fut>(self, method: Method, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handler(method, path, handler_fn(handler))
    }

    /// Adds a GET route.
    pub fn get<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Get, path, handler)
    }

    /// Adds a POST route.
    pub fn post<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Post, path, handler)
    }

    /// Adds a PUT route.
    pub fn put<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Put, path, handler)
    }

    /// Adds a PATCH route.
    pub fn patch<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Patch, path, handler)
    }

    /// Adds a DELETE route.
    pub fn delete<F, Fut>(self, path: &str, handler: F) -> Result<Self>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.route(Method::Delete, path, handler)
    }

    /// Registers every route of `group`, wrapped in the router middleware.
    pub fn group(mut self, group: RouteGroup) -> Result<Self> {
        for (method, path, handler) in group.routes {
            self = self.handler(method, &path, handler)?;
        }
        Ok(self)
    }

    /// Freezes the table. No route can be added to the returned router.
    #[must_use]
    pub fn build(self) -> Router<T> {
        info!(routes = self.table.len(), "router built");
        Router {
            table: Arc::new(self.table),
        }
    }
}

/// An immutable routing table ready to serve requests.
///
/// Cheap to clone and safe to share between tasks; lookups only read.
pub struct Router<T = RoutingTable<Handler>> {
    table: Arc<T>,
}

impl<T> Clone for Router<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl Router {
    /// Starts building a router backed by a [`RoutingTable`].
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }
}

impl<T: Backend<Handler>> Router<T> {
    /// Resolves `path` for `method` without invoking anything.
    #[must_use]
    pub fn resolve<'a>(&'a self, method: Method, path: &'a str) -> Option<RouteMatch<'a, Handler>> {
        self.table.resolve(method, path)
    }

    /// Every registered (method, pattern) pair, in the backend's order
    /// (sorted for [`RoutingTable`]).
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.table.routes()
    }

    /// Total number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the router has no route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolves the request and runs its handler.
    ///
    /// Fails with [`RouterError::NotFound`] when no route matches and with
    /// [`RouterError::Handler`] when the handler fails; neither is retried.
    pub async fn dispatch(&self, mut request: Request) -> Result<Response> {
        let handler = {
            let Some(found) = self.table.resolve(request.method, &request.path) else {
                debug!(method = %request.method, path = %request.path, "no route matched");
                return Err(RouterError::NotFound {
                    method: request.method.to_string(),
                    path: request.path.clone(),
                });
            };
            request.params = PathParams::from(&found.params);
            Arc::clone(found.handler)
        };

        Ok(handler(request).await?)
    }

    /// Resolves and runs the request, rendering failures as responses.
    ///
    /// A miss becomes 404 and a handler failure becomes 500 carrying the
    /// error message.
    pub async fn handle(&self, request: Request) -> Response {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(RouterError::NotFound { .. }) => Response::not_found(),
            Err(RouterError::Handler(err)) => {
                error!(error = %err, "handler failed");
                Response::internal_server_error_with(&err)
            }
            Err(err) => {
                error!(error = %err, "dispatch failed");
                Response::internal_server_error()
            }
        }
    }
}
