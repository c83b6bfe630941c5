//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / config / watcher:
//!     → tracing events (debug on registration, trace on lookup misses,
//!       info/error on reloads)
//!     → logging.rs (subscriber installed by the binary)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Lookups stay silent above trace level; they are the hot path
//! - Registration and reload events carry structured fields (path, method, routes)

pub mod logging;
