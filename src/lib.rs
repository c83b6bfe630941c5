//! Trie-based HTTP path router.
//!
//! Routes are registered into a tree of path segments (`/users/:id`),
//! sub-routers can be mounted under a path, and lookups resolve a
//! `(method, path)` pair to a handler plus extracted path parameters.
//!
//! ```
//! use delta_router::{HttpMethod, Route, RoutingTrie};
//!
//! let users = RoutingTrie::from_routes([
//!     Route::handler(HttpMethod::Get, "/:id", "show_user"),
//! ])?;
//! let router = RoutingTrie::from_routes([
//!     Route::handler(HttpMethod::All, "/health", "health"),
//!     Route::mount("/users", users),
//! ])?;
//!
//! let m = router.resolve("GET", "/users/42?verbose=1").unwrap();
//! assert_eq!(*m.handler, "show_user");
//! assert_eq!(m.params["id"], "42");
//! assert!(router.resolve("DELETE", "/users/42").is_none());
//! # Ok::<(), delta_router::RouterError>(())
//! ```

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RouteTableConfig;
pub use routing::{
    HttpMethod, ParamConflictPolicy, Resolver, Route, RouteInfo, RouteMatch, RouterError,
    RoutingTrie, SharedRouter,
};
