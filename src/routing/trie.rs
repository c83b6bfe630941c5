//! Segment trie: route registration, sub-router mounting and lookup.
//!
//! # Responsibilities
//! - Register routes into a tree keyed by path segment
//! - Mount fully built sub-routers at a path (moves their subtree in)
//! - Resolve (method, path) to a handler plus extracted parameters
//!
//! # Design Decisions
//! - One literal map and at most one parameter child per node
//! - Literal edges win over the parameter edge; the first matching edge is final
//! - Method mismatch looks exactly like a path miss to the caller
//! - Handlers are opaque: stored and handed back, never called

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::routing::error::RouterError;
use crate::routing::method::HttpMethod;
use crate::routing::segment::{parse_route_path, split_path, strip_query, Segment};

/// What to do when two routes name the same parameter slot differently,
/// e.g. `/a/:x/c` followed by `/a/:y/d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamConflictPolicy {
    /// The most recent registration's name is used for every leaf below the slot.
    #[default]
    LastWins,
    /// Registration fails with [`RouterError::ParamConflict`].
    Reject,
}

/// The resolver half of a route registration.
#[derive(Debug)]
pub enum Resolver<H> {
    /// Terminal handler for the route.
    Handler(H),
    /// A fully built router whose routes are mounted below the path.
    Router(RoutingTrie<H>),
}

/// A route registration record.
#[derive(Debug)]
pub struct Route<H> {
    pub path: String,
    pub method: HttpMethod,
    pub resolver: Resolver<H>,
}

impl<H> Route<H> {
    /// Route that terminates in a handler.
    pub fn handler(method: HttpMethod, path: impl Into<String>, handler: H) -> Self {
        Self {
            path: path.into(),
            method,
            resolver: Resolver::Handler(handler),
        }
    }

    /// Route that mounts a sub-router. The method is not used for mounts.
    pub fn mount(path: impl Into<String>, router: RoutingTrie<H>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::All,
            resolver: Resolver::Router(router),
        }
    }

    /// Build a route from loosely specified parts, as produced by
    /// declarative route tables. Exactly one of `handler` and `router`
    /// must be present.
    pub fn from_parts(
        path: impl Into<String>,
        method: HttpMethod,
        handler: Option<H>,
        router: Option<RoutingTrie<H>>,
    ) -> Result<Self, RouterError> {
        let path = path.into();
        let resolver = match (handler, router) {
            (Some(handler), None) => Resolver::Handler(handler),
            (None, Some(router)) => Resolver::Router(router),
            (None, None) => {
                return Err(RouterError::InvalidRoute {
                    path,
                    reason: "expected a route handler or a nested router".to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(RouterError::InvalidRoute {
                    path,
                    reason: "a route cannot have both a handler and a nested router".to_string(),
                })
            }
        };

        Ok(Self {
            path,
            method,
            resolver,
        })
    }
}

/// Successful lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, H> {
    /// The registered handler.
    pub handler: &'a H,
    /// Parameter name → raw segment text.
    pub params: HashMap<String, String>,
}

/// A registered route leaf, for introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub method: HttpMethod,
    /// Path pattern with parameters written as `:name`.
    pub pattern: String,
}

#[derive(Debug)]
struct Node<H> {
    /// Segment this node represents. `None` only at the root.
    segment: Option<Segment>,
    children: HashMap<String, Node<H>>,
    param_child: Option<Box<Node<H>>>,
    /// Method and handler, set together on route leaves.
    endpoint: Option<(HttpMethod, H)>,
}

impl<H> Node<H> {
    fn new() -> Self {
        Self {
            segment: None,
            children: HashMap::new(),
            param_child: None,
            endpoint: None,
        }
    }

    fn existing_child(&self, segment: &Segment) -> Option<&Node<H>> {
        if segment.is_param {
            self.param_child.as_deref()
        } else {
            self.children.get(&segment.value)
        }
    }

    /// Get or create the child for `segment`, recording the descriptor on it.
    /// Conflicts must already have been ruled out by `RoutingTrie::check`.
    fn child_for(&mut self, segment: Segment, path: &str) -> &mut Node<H> {
        if !segment.is_param {
            let child = self
                .children
                .entry(segment.value.clone())
                .or_insert_with(Node::new);
            child.segment = Some(segment);
            return child;
        }

        let child = self.param_child.get_or_insert_with(|| Box::new(Node::new()));
        if let Some(existing) = child.segment.as_ref().filter(|s| s.value != segment.value) {
            tracing::debug!(
                path = %path,
                previous = %existing.value,
                current = %segment.value,
                "Parameter slot renamed"
            );
        }
        child.segment = Some(segment);
        &mut **child
    }

    /// First key of `nested` that is already taken here. The parameter
    /// slot is reported as `*`.
    fn mount_conflict(&self, nested: &Node<H>) -> Option<String> {
        nested
            .children
            .keys()
            .find(|key| self.children.contains_key(*key))
            .cloned()
            .or_else(|| {
                (nested.param_child.is_some() && self.param_child.is_some())
                    .then(|| "*".to_string())
            })
    }

    /// Move the nested root's children in.
    fn absorb(&mut self, nested: Node<H>, path: &str) {
        if nested.endpoint.is_some() {
            tracing::warn!(path = %path, "Root handler of mounted router is not reachable and was dropped");
        }

        self.children.extend(nested.children);
        if nested.param_child.is_some() {
            self.param_child = nested.param_child;
        }
    }

    fn collect_routes(&self, prefix: &mut Vec<String>, out: &mut Vec<RouteInfo>) {
        if let Some((method, _)) = &self.endpoint {
            out.push(RouteInfo {
                method: *method,
                pattern: format!("/{}", prefix.join("/")),
            });
        }
        for child in self.children.values().chain(self.param_child.as_deref()) {
            let piece = child
                .segment
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            prefix.push(piece);
            child.collect_routes(prefix, out);
            prefix.pop();
        }
    }

    fn leaf_count(&self) -> usize {
        let own = usize::from(self.endpoint.is_some());
        own + self
            .children
            .values()
            .chain(self.param_child.as_deref())
            .map(Node::leaf_count)
            .sum::<usize>()
    }
}

/// Trie of path segments mapping (method, path) to handlers.
///
/// Build it with [`register`](Self::register) or
/// [`from_routes`](Self::from_routes), then share it for lookups. Mounting
/// moves a router into its parent, so a mounted router can no longer be
/// changed behind the parent's back.
#[derive(Debug)]
pub struct RoutingTrie<H> {
    root: Node<H>,
    policy: ParamConflictPolicy,
}

impl<H> Default for RoutingTrie<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RoutingTrie<H> {
    /// Create an empty trie with the default parameter conflict policy.
    pub fn new() -> Self {
        Self::with_policy(ParamConflictPolicy::default())
    }

    pub fn with_policy(policy: ParamConflictPolicy) -> Self {
        Self {
            root: Node::new(),
            policy,
        }
    }

    /// Build a trie from a batch of routes, failing on the first bad one.
    pub fn from_routes<I>(routes: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = Route<H>>,
    {
        Self::from_routes_with_policy(routes, ParamConflictPolicy::default())
    }

    pub fn from_routes_with_policy<I>(routes: I, policy: ParamConflictPolicy) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = Route<H>>,
    {
        let mut trie = Self::with_policy(policy);
        for route in routes {
            trie.register(route)?;
        }
        Ok(trie)
    }

    pub fn policy(&self) -> ParamConflictPolicy {
        self.policy
    }

    /// Register a single route.
    ///
    /// An empty path (`""` or `"/"`) registers on the root node. A failed
    /// registration leaves the trie exactly as it was.
    pub fn register(&mut self, route: Route<H>) -> Result<(), RouterError> {
        let Route {
            path,
            method,
            resolver,
        } = route;

        let segments = parse_route_path(&path);
        if segments.iter().any(|s| s.is_param && s.value.is_empty()) {
            return Err(RouterError::InvalidRoute {
                path,
                reason: "parameter segment without a name".to_string(),
            });
        }

        self.check(&segments, &resolver, &path)?;

        let mut node = &mut self.root;
        for segment in segments {
            node = node.child_for(segment, &path);
        }

        match resolver {
            Resolver::Router(nested) => {
                node.absorb(nested.root, &path);
                tracing::debug!(path = %path, "Mounted nested router");
            }
            Resolver::Handler(handler) => {
                node.endpoint = Some((method, handler));
                tracing::debug!(method = %method, path = %path, "Registered route");
            }
        }
        Ok(())
    }

    /// Read-only walk that finds every error `register` could hit, before
    /// anything is created or renamed.
    fn check(&self, segments: &[Segment], resolver: &Resolver<H>, path: &str) -> Result<(), RouterError> {
        let mut node = &self.root;
        for segment in segments {
            let Some(child) = node.existing_child(segment) else {
                // The rest of the path is new, so nothing below can collide.
                return Ok(());
            };
            if self.policy == ParamConflictPolicy::Reject {
                if let Some(existing) = child
                    .segment
                    .as_ref()
                    .filter(|s| segment.is_param && s.value != segment.value)
                {
                    return Err(RouterError::ParamConflict {
                        path: path.to_string(),
                        existing: existing.value.clone(),
                        attempted: segment.value.clone(),
                    });
                }
            }
            node = child;
        }

        match resolver {
            Resolver::Router(nested) => match node.mount_conflict(&nested.root) {
                Some(key) => Err(RouterError::RouterExists {
                    path: path.to_string(),
                    key,
                }),
                None => Ok(()),
            },
            Resolver::Handler(_) if node.endpoint.is_some() => Err(RouterError::HandlerExists {
                path: path.to_string(),
            }),
            Resolver::Handler(_) => Ok(()),
        }
    }

    /// Resolve a request method and path.
    ///
    /// The query string is ignored. Returns `None` when no route matches,
    /// including when the path matches but the method does not.
    pub fn resolve(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        let mut params = HashMap::new();
        let mut node = &self.root;

        for piece in split_path(strip_query(path)) {
            if let Some(child) = node.children.get(piece) {
                node = child;
                continue;
            }

            let Some(child) = node.param_child.as_deref() else {
                tracing::trace!(method = %method, path = %path, segment = %piece, "No route matched");
                return None;
            };
            if let Some(segment) = &child.segment {
                params.insert(segment.value.clone(), piece.to_string());
            }
            node = child;
        }

        let (registered, handler) = node.endpoint.as_ref()?;
        if !registered.accepts(method) {
            tracing::trace!(method = %method, path = %path, registered = %registered, "Method not allowed for route");
            return None;
        }

        Some(RouteMatch { handler, params })
    }

    /// All registered routes, sorted by pattern then method.
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut out = Vec::new();
        self.root.collect_routes(&mut Vec::new(), &mut out);
        out.sort_by(|a, b| {
            a.pattern
                .cmp(&b.pattern)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        out
    }

    /// Number of route leaves.
    pub fn len(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
