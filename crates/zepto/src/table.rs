//! Per-method routing table: exact static map plus parameter trie.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::params::Params;
use crate::path::{check_path, is_static, normalize};
use crate::request::Method;
use crate::trie::ParamTrie;

/// Exact map from a full literal path to its handler.
pub struct StaticTable<H> {
    routes: HashMap<Box<str>, H>,
}

impl<H> Default for StaticTable<H> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }
}

impl<H> StaticTable<H> {
    /// Stores `handler` under `path`, returning the handler it replaced.
    pub fn insert(&mut self, path: &str, handler: H) -> Option<H> {
        self.routes.insert(path.into(), handler)
    }

    /// Exact lookup.
    #[inline]
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&H> {
        self.routes.get(path)
    }

    /// Number of static paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table holds no path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths, unordered.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(AsRef::as_ref)
    }
}

/// A successful resolution: the handler and the parameters it bound.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The handler registered for the route.
    pub handler: &'a H,
    /// Bound parameters in path order; empty for static routes.
    pub params: Params<'a>,
}

/// Owns the static tables and parameter tries of every method.
///
/// `register` needs `&mut self` and `resolve` needs `&self`, so the borrow
/// checker keeps registration and lookups apart.
pub struct RoutingTable<H> {
    statics: HashMap<Method, StaticTable<H>>,
    tries: HashMap<Method, ParamTrie<H>>,
}

impl<H> Default for RoutingTable<H> {
    fn default() -> Self {
        Self {
            statics: HashMap::new(),
            tries: HashMap::new(),
        }
    }
}

impl<H> RoutingTable<H> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` and the pattern `raw_path`.
    ///
    /// Paths without parameter segments go to the static table, where a
    /// repeated registration silently replaces the previous handler. Other
    /// paths are inserted into the method's trie; see [`ParamTrie::insert`]
    /// for the conflicts that are rejected.
    pub fn register(&mut self, method: Method, raw_path: &str, handler: H) -> Result<()> {
        let path = normalize(raw_path);

        if is_static(path) {
            check_path(path)?;
            let replaced = self
                .statics
                .entry(method)
                .or_default()
                .insert(path, handler)
                .is_some();
            debug!(%method, path, replaced, "registered static route");
            return Ok(());
        }

        let replaced = self
            .tries
            .entry(method)
            .or_default()
            .insert(path, handler)?
            .is_some();
        debug!(%method, path, replaced, "registered parametric route");
        Ok(())
    }

    /// Resolves `raw_path` for `method`.
    ///
    /// The static table is probed first; on a miss the method's trie is
    /// walked. Returns `None` when nothing matches, including for paths
    /// without a leading slash or with an empty segment, which no
    /// registration can produce.
    pub fn resolve<'a>(&'a self, method: Method, raw_path: &'a str) -> Option<RouteMatch<'a, H>> {
        let path = normalize(raw_path);

        if let Some(handler) = self.statics.get(&method).and_then(|table| table.get(path)) {
            return Some(RouteMatch {
                handler,
                params: Params::new(),
            });
        }

        let (handler, params) = self.tries.get(&method)?.lookup(path)?;
        Some(RouteMatch { handler, params })
    }

    /// Number of static routes across all methods.
    #[must_use]
    pub fn static_routes(&self) -> usize {
        self.statics.values().map(StaticTable::len).sum()
    }

    /// Number of parametric routes across all methods.
    #[must_use]
    pub fn param_routes(&self) -> usize {
        self.tries.values().map(ParamTrie::len).sum()
    }

    /// Total number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.static_routes() + self.param_routes()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered (method, pattern) pair, sorted.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut routes: Vec<_> = self
            .statics
            .iter()
            .flat_map(|(method, table)| table.paths().map(move |path| (*method, path.to_string())))
            .chain(self.tries.iter().flat_map(|(method, trie)| {
                trie.patterns().into_iter().map(move |pattern| (*method, pattern))
            }))
            .collect();
        routes.sort();
        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;

    fn scenario() -> RoutingTable<&'static str> {
        let mut table = RoutingTable::new();
        table.register(Method::Get, "/hello/:id", "hello").unwrap();
        table.register(Method::Get, "/users", "users").unwrap();
        table
    }

    #[test]
    fn test_static_hit() {
        let table = scenario();
        let found = table.resolve(Method::Get, "/users").unwrap();
        assert_eq!(*found.handler, "users");
        assert!(found.params.is_empty());
        assert!(!found.params.spilled());
    }

    #[test]
    fn test_static_hit_with_trailing_slash() {
        let table = scenario();
        assert_eq!(*table.resolve(Method::Get, "/users/").unwrap().handler, "users");
    }

    #[test]
    fn test_param_hit() {
        let table = scenario();
        let found = table.resolve(Method::Get, "/hello/42").unwrap();
        assert_eq!(*found.handler, "hello");
        assert_eq!(found.params.get("id"), Some("42"));
        assert_eq!(found.params.len(), 1);
    }

    #[test]
    fn test_misses() {
        let table = scenario();
        assert!(table.resolve(Method::Get, "/hello").is_none());
        assert!(table.resolve(Method::Post, "/users").is_none());
        assert!(table.resolve(Method::Get, "/nope/42").is_none());
    }

    #[test]
    fn test_root_route() {
        let mut table = RoutingTable::new();
        table.register(Method::Get, "", "root").unwrap();
        assert_eq!(*table.resolve(Method::Get, "/").unwrap().handler, "root");
        assert_eq!(*table.resolve(Method::Get, "").unwrap().handler, "root");
    }

    #[test]
    fn test_static_last_write_wins() {
        let mut table = RoutingTable::new();
        table.register(Method::Get, "/users", "first").unwrap();
        table.register(Method::Get, "/users/", "second").unwrap();
        assert_eq!(*table.resolve(Method::Get, "/users").unwrap().handler, "second");
        assert_eq!(table.static_routes(), 1);
    }

    #[test]
    fn test_static_shadows_trie() {
        let mut table = RoutingTable::new();
        table.register(Method::Get, "/users/:id", "by_id").unwrap();
        table.register(Method::Get, "/users/me", "me").unwrap();
        assert_eq!(*table.resolve(Method::Get, "/users/me").unwrap().handler, "me");
        assert_eq!(*table.resolve(Method::Get, "/users/5").unwrap().handler, "by_id");
    }

    #[test]
    fn test_conflict_is_reported() {
        let mut table = scenario();
        let err = table.register(Method::Get, "/hello/:name", "other").unwrap_err();
        assert!(matches!(err, RouterError::ParamConflict { .. }));
        // Other methods have their own trie.
        table.register(Method::Post, "/hello/:name", "post").unwrap();
    }

    #[test]
    fn test_malformed_paths_rejected_and_never_matched() {
        let mut table = scenario();
        table.register(Method::Get, "/api/x", "x").unwrap();
        table.register(Method::Get, "/api/:v/x", "vx").unwrap();
        for bad in ["users", "//users", "/api//x"] {
            assert!(matches!(
                table.register(Method::Get, bad, "bad"),
                Err(RouterError::InvalidPattern(_))
            ));
        }
        for path in ["users", "//users", "/api//x", "//hello//42", "hello/42", "/api//1///x"] {
            assert!(table.resolve(Method::Get, path).is_none(), "{path} matched");
        }
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_routes_listing() {
        let table = scenario();
        assert_eq!(
            table.routes(),
            [
                (Method::Get, "/hello/:id".to_string()),
                (Method::Get, "/users".to_string()),
            ]
        );
        assert_eq!(table.len(), 2);
    }
}
