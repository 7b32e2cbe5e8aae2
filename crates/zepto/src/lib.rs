//! # zepto
//!
//! A small HTTP request router built around a segment trie.
//!
//! This crate provides:
//! - Exact-match lookup for static routes and a trie for `:param` routes
//! - Allocation-free resolution for routes with up to four parameters
//! - HTTP method-based routing
//! - Middleware composed once, at registration, in onion order
//! - Route groups with prefixes and their own middleware
//! - A [`Backend`] trait for plugging in custom route storage
//!
//! ## Quick Start
//!
//! ```
//! use zepto::{Request, Response, Router};
//!
//! # async fn run() -> zepto::Result<()> {
//! let router = Router::builder()
//!     .get("/hello/:id", |req: Request| async move {
//!         Response::json(200, &serde_json::json!({ "id": req.param("id") }))
//!     })?
//!     .get("/users", |_req: Request| async { Ok(Response::text("users")) })?
//!     .build();
//!
//! let response = router.handle(Request::get("/hello/42")).await;
//! assert_eq!(response.status, 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Resolution
//!
//! Paths are normalized first: an empty path becomes `/` and one trailing
//! slash is dropped. Static routes are found with a single map probe.
//! Otherwise the trie is walked one segment at a time; a literal child
//! always wins over the parametric child at the same depth, and a dead end
//! is a miss (there is no backtracking).
//!
//! ```
//! use zepto::{Method, RoutingTable};
//!
//! let mut table = RoutingTable::new();
//! table.register(Method::Get, "/users/:user/posts/:post", "post").unwrap();
//!
//! let found = table.resolve(Method::Get, "/users/7/posts/42").unwrap();
//! assert_eq!(*found.handler, "post");
//! assert_eq!(found.params.get("user"), Some("7"));
//! assert_eq!(found.params.get("post"), Some("42"));
//! ```
//!
//! Only one parameter name may be bound at a given depth. Registering
//! `/users/:uid/posts` after `/users/:id` fails with
//! [`RouterError::ParamConflict`].
//!
//! ## Middleware and groups
//!
//! ```
//! use zepto::{from_fn, Handler, Logger, Request, Response, RouteGroup, Router};
//!
//! # fn main() -> zepto::Result<()> {
//! let auth = from_fn(|req: Request, next: Handler| async move {
//!     if req.get_header("Authorization").is_none() {
//!         return Ok(Response::new(401));
//!     }
//!     next(req).await
//! });
//!
//! let api = RouteGroup::new("/api")
//!     .middleware(auth)
//!     .get("/users", |_req: Request| async { Ok(Response::text("protected")) });
//!
//! let router = Router::builder().middleware(Logger).group(api)?.build();
//! assert_eq!(router.len(), 1);
//! # Ok(())
//! # }
//! ```

mod backend;
mod error;
mod handler;
mod middleware;
mod node;
mod params;
mod path;
mod request;
mod response;
mod router;
mod table;
mod trie;

pub use backend::Backend;
pub use error::{HandlerError, Result, RouterError};
pub use handler::{handler_fn, Handler, HandlerResult};
pub use middleware::{from_fn, Chain, Logger, Middleware};
pub use params::{Param, Params, INLINE_PARAMS};
pub use path::{normalize, Segments, PARAM_MARKER};
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{RouteGroup, Router, RouterBuilder};
pub use table::{RouteMatch, RoutingTable, StaticTable};
pub use trie::ParamTrie;
