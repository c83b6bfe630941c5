//! Route table file watcher for hot reload.

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_router;
use crate::routing::RoutingTrie;

/// Watches a route table file and rebuilds the trie when it changes.
pub struct RouteTableWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RoutingTrie<String>>,
}

impl RouteTableWatcher {
    /// Create a new RouteTableWatcher.
    ///
    /// Returns the watcher and a receiver for freshly built tries.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RoutingTrie<String>>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Route table change detected, rebuilding");
                        match load_router(&path) {
                            Ok(trie) => {
                                tracing::info!(routes = trie.len(), "Route table rebuilt");
                                let _ = tx.send(trie);
                            }
                            Err(e) => {
                                tracing::error!(
                                    error = %e,
                                    cause = e.source().map(tracing::field::display),
                                    "Failed to reload route table, keeping current routes"
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route table watcher started");
        Ok(watcher)
    }
}
