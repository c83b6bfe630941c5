//! Build routing tries from route tables.
//!
//! Handler names become the trie's handler values, so a lookup yields the
//! name of the handler the hosting application should run. Mounted tables
//! are built depth-first and moved into their parent.

use crate::config::schema::{RouteConfig, RouteTableConfig};
use crate::routing::{HttpMethod, ParamConflictPolicy, Route, RouterError, RoutingTrie};

/// Build the trie described by a route table.
///
/// The table's parameter conflict policy applies to every nested table.
pub fn build_router(config: &RouteTableConfig) -> Result<RoutingTrie<String>, RouterError> {
    let policy = config.settings.param_conflict;
    let trie = build_routes(&config.routes, config, policy, &mut Vec::new())?;
    tracing::debug!(routes = trie.len(), policy = ?policy, "Route table built");
    Ok(trie)
}

fn build_routes(
    routes: &[RouteConfig],
    config: &RouteTableConfig,
    policy: ParamConflictPolicy,
    stack: &mut Vec<String>,
) -> Result<RoutingTrie<String>, RouterError> {
    let mut trie = RoutingTrie::with_policy(policy);

    for route in routes {
        let method = route.method.parse::<HttpMethod>().map_err(|e| {
            RouterError::InvalidRoute {
                path: route.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let nested = match &route.mount {
            Some(table) => Some(build_table(table, &route.path, config, policy, stack)?),
            None => None,
        };

        trie.register(Route::from_parts(
            route.path.clone(),
            method,
            route.handler.clone(),
            nested,
        )?)?;
    }

    Ok(trie)
}

fn build_table(
    name: &str,
    mount_path: &str,
    config: &RouteTableConfig,
    policy: ParamConflictPolicy,
    stack: &mut Vec<String>,
) -> Result<RoutingTrie<String>, RouterError> {
    if stack.iter().any(|n| n == name) {
        return Err(RouterError::InvalidRoute {
            path: mount_path.to_string(),
            reason: format!("table '{}' mounts itself", name),
        });
    }

    let table = config.tables.get(name).ok_or_else(|| RouterError::InvalidRoute {
        path: mount_path.to_string(),
        reason: format!("unknown table '{}'", name),
    })?;

    stack.push(name.to_string());
    let built = build_routes(&table.routes, config, policy, stack);
    stack.pop();
    built
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TableConfig;

    #[test]
    fn test_build_with_mounts() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::handler("GET", "/health", "health"));
        cfg.routes.push(RouteConfig::mount("/api", "api"));
        cfg.tables.insert(
            "api".into(),
            TableConfig {
                routes: vec![
                    RouteConfig::handler("get", "/users/:id", "get_user"),
                    RouteConfig::mount("/admin", "admin"),
                ],
            },
        );
        cfg.tables.insert(
            "admin".into(),
            TableConfig {
                routes: vec![RouteConfig::handler("ALL", "/stats", "stats")],
            },
        );

        let trie = build_router(&cfg).unwrap();
        assert_eq!(trie.len(), 3);

        let m = trie.resolve("GET", "/api/users/12").unwrap();
        assert_eq!(m.handler, "get_user");
        assert_eq!(m.params["id"], "12");

        assert_eq!(trie.resolve("PATCH", "/api/admin/stats").unwrap().handler, "stats");
        assert!(trie.resolve("POST", "/health").is_none());
    }

    #[test]
    fn test_missing_resolver_is_invalid() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig {
            path: "/nothing".into(),
            method: "GET".into(),
            handler: None,
            mount: None,
        });

        let err = build_router(&cfg).unwrap_err();
        assert!(matches!(err, RouterError::InvalidRoute { ref path, .. } if path == "/nothing"));
    }

    #[test]
    fn test_handler_and_mount_is_invalid() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig {
            path: "/both".into(),
            method: "GET".into(),
            handler: Some("h".into()),
            mount: Some("t".into()),
        });
        cfg.tables.insert("t".into(), TableConfig::default());

        assert!(matches!(build_router(&cfg), Err(RouterError::InvalidRoute { .. })));
    }

    #[test]
    fn test_unknown_method_and_table() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::handler("FETCH", "/a", "a"));
        assert!(matches!(build_router(&cfg), Err(RouterError::InvalidRoute { .. })));

        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::mount("/b", "missing"));
        assert!(matches!(build_router(&cfg), Err(RouterError::InvalidRoute { .. })));
    }

    #[test]
    fn test_cycle_does_not_recurse_forever() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::mount("/x", "a"));
        cfg.tables.insert(
            "a".into(),
            TableConfig {
                routes: vec![RouteConfig::mount("/y", "a")],
            },
        );
        assert!(matches!(build_router(&cfg), Err(RouterError::InvalidRoute { .. })));
    }

    #[test]
    fn test_duplicate_routes_propagate() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::handler("GET", "/a", "one"));
        cfg.routes.push(RouteConfig::handler("POST", "/a", "two"));
        assert_eq!(
            build_router(&cfg).unwrap_err(),
            RouterError::HandlerExists { path: "/a".into() }
        );

        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::mount("/a", "t"));
        cfg.routes.push(RouteConfig::mount("/a", "t"));
        cfg.tables.insert(
            "t".into(),
            TableConfig {
                routes: vec![RouteConfig::handler("GET", "/b", "b")],
            },
        );
        assert!(matches!(build_router(&cfg), Err(RouterError::RouterExists { .. })));
    }

    #[test]
    fn test_policy_applies_to_nested_tables() {
        let mut cfg = RouteTableConfig::default();
        cfg.settings.param_conflict = ParamConflictPolicy::Reject;
        cfg.routes.push(RouteConfig::mount("/n", "t"));
        cfg.tables.insert(
            "t".into(),
            TableConfig {
                routes: vec![
                    RouteConfig::handler("GET", "/:x/a", "a"),
                    RouteConfig::handler("GET", "/:y/b", "b"),
                ],
            },
        );
        assert!(matches!(build_router(&cfg), Err(RouterError::ParamConflict { .. })));
    }
}
