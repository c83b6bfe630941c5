//! Route table configuration subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → builder.rs (nested tables first, then mount into parents)
//!     → RoutingTrie<String> (immutable, handler names as values)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads and builds a new trie
//!     → sent over a channel, swapped into a SharedRouter by the receiver
//! ```
//!
//! # Design Decisions
//! - A table is never patched in place; changes rebuild the whole trie
//! - All fields have defaults to allow minimal tables
//! - Validation separates syntactic (serde) from semantic checks

pub mod builder;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use builder::build_router;
pub use loader::{load_router, load_table, parse_table, ConfigError};
pub use schema::{RouteConfig, RouteTableConfig, RouterSettings, TableConfig};
pub use validation::ValidationError;
pub use watcher::RouteTableWatcher;
