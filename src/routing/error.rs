//! Route registration errors.

use thiserror::Error;

/// Errors raised while building a routing trie.
///
/// All of these are fatal to construction. Lookup misses are not errors and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Mounting a nested router would overwrite an existing child.
    #[error("router already exists for route '{path}' (segment key '{key}')")]
    RouterExists { path: String, key: String },

    /// Two direct handlers were registered at the same path.
    #[error("handler already exists for route '{path}'")]
    HandlerExists { path: String },

    /// The registration record is neither a handler nor a nested router.
    #[error("invalid route '{path}': {reason}")]
    InvalidRoute { path: String, reason: String },

    /// Two parameter names compete for the same wildcard slot.
    #[error("parameter conflict on route '{path}': ':{attempted}' collides with ':{existing}'")]
    ParamConflict {
        path: String,
        existing: String,
        attempted: String,
    },
}
