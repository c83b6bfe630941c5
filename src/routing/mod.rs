//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     Route { path, method, resolver }
//!     → segment.rs (split path, tag params)
//!     → trie.rs (walk/create nodes, attach handler or mount sub-trie)
//!     → Freeze as immutable RoutingTrie
//!
//! Incoming Request (method, path):
//!     → segment.rs (strip query, split path)
//!     → trie.rs (literal edge first, then wildcard edge)
//!     → method.rs (method check, ALL matches anything)
//!     → Return: RouteMatch { handler, params } or None
//! ```
//!
//! # Design Decisions
//! - Tries are built once, immutable afterwards (thread-safe without locks)
//! - O(segments) lookup, no backtracking
//! - Not-found is `None`, never an error
//! - Reloads swap whole tries (see `shared.rs`), never mutate a live one

pub mod error;
pub mod method;
pub mod segment;
pub mod shared;
pub mod trie;

pub use error::RouterError;
pub use method::HttpMethod;
pub use segment::Segment;
pub use shared::SharedRouter;
pub use trie::{ParamConflictPolicy, Resolver, Route, RouteInfo, RouteMatch, RoutingTrie};
