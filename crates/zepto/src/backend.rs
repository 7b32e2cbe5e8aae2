//! Pluggable storage behind a [`crate::Router`].

use crate::error::Result;
use crate::request::Method;
use crate::table::{RouteMatch, RoutingTable};

/// What a router needs from its route storage: registration while
/// building, lookups once built.
///
/// [`RoutingTable`] is the default. A custom backend can bind parameters
/// with [`crate::Params::push`].
pub trait Backend<H>: Send + Sync {
    /// Stores `handler` for `method` and the pattern `path`.
    fn register(&mut self, method: Method, path: &str, handler: H) -> Result<()>;

    /// Finds the handler and bound parameters for a concrete path.
    fn resolve<'a>(&'a self, method: Method, path: &'a str) -> Option<RouteMatch<'a, H>>;

    /// Every registered (method, pattern) pair.
    fn routes(&self) -> Vec<(Method, String)>;

    /// Number of registered routes.
    fn len(&self) -> usize {
        self.routes().len()
    }

    /// Returns true if nothing is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Send + Sync> Backend<H> for RoutingTable<H> {
    fn register(&mut self, method: Method, path: &str, handler: H) -> Result<()> {
        Self::register(self, method, path, handler)
    }

    fn resolve<'a>(&'a self, method: Method, path: &'a str) -> Option<RouteMatch<'a, H>> {
        Self::resolve(self, method, path)
    }

    fn routes(&self) -> Vec<(Method, String)> {
        Self::routes(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}
