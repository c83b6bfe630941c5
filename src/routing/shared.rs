//! Atomically replaceable router.
//!
//! # Responsibilities
//! - Hand out lock-free snapshots of the current trie
//! - Replace the whole trie in one atomic step on reload
//!
//! # Design Decisions
//! - A live trie is never mutated; reload means build a new one and swap it in
//! - In-flight lookups keep their snapshot until they drop it

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::trie::RoutingTrie;

/// Owned lookup result, detached from any snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<H> {
    pub handler: H,
    pub params: HashMap<String, String>,
}

/// A routing trie behind an `ArcSwap`.
#[derive(Debug)]
pub struct SharedRouter<H> {
    current: ArcSwap<RoutingTrie<H>>,
}

impl<H> SharedRouter<H> {
    pub fn new(trie: RoutingTrie<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(trie),
        }
    }

    /// Snapshot of the current trie.
    pub fn load(&self) -> Arc<RoutingTrie<H>> {
        self.current.load_full()
    }

    /// Swap in a fully built trie, returning the previous one.
    pub fn replace(&self, trie: RoutingTrie<H>) -> Arc<RoutingTrie<H>> {
        let routes = trie.len();
        let previous = self.current.swap(Arc::new(trie));
        tracing::info!(
            previous_routes = previous.len(),
            routes,
            "Routing table replaced"
        );
        previous
    }
}

impl<H: Clone> SharedRouter<H> {
    /// Resolve against the current trie and clone the handler out.
    pub fn resolve_owned(&self, method: &str, path: &str) -> Option<ResolvedRoute<H>> {
        let guard = self.current.load();
        guard.resolve(method, path).map(|m| ResolvedRoute {
            handler: m.handler.clone(),
            params: m.params,
        })
    }
}

impl<H> From<RoutingTrie<H>> for SharedRouter<H> {
    fn from(trie: RoutingTrie<H>) -> Self {
        Self::new(trie)
    }
}
