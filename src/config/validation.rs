//! Route table validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that mounts reference existing tables
//! - Detect mount cycles
//! - Check method names and handler names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouteTableConfig → Result<(), Vec<ValidationError>>
//! - Handler/mount exclusivity is left to the builder (`RouterError::InvalidRoute`)

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::schema::{RouteConfig, RouteTableConfig};
use crate::routing::HttpMethod;

/// Name used for the top-level route list in error messages.
pub const ROOT_TABLE: &str = "<root>";

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{table}: route '{path}' has unknown method '{method}'")]
    UnknownMethod {
        table: String,
        path: String,
        method: String,
    },

    #[error("{table}: route '{path}' mounts unknown table '{mount}'")]
    UnknownTable {
        table: String,
        path: String,
        mount: String,
    },

    #[error("{table}: route '{path}' has an empty handler name")]
    EmptyHandler { table: String, path: String },

    #[error("mount cycle: {}", .cycle.join(" -> "))]
    MountCycle { cycle: Vec<String> },
}

/// Validate a route table, collecting every problem.
pub fn validate_table(config: &RouteTableConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_routes(ROOT_TABLE, &config.routes, config, &mut errors);
    for (name, table) in &config.tables {
        check_routes(name, &table.routes, config, &mut errors);
    }

    let mut reported = BTreeSet::new();
    for name in config.tables.keys() {
        let mut stack = Vec::new();
        if let Some(cycle) = find_cycle(name, config, &mut stack) {
            // Each cycle is found once per member; report it once.
            let members: BTreeSet<String> = cycle.iter().cloned().collect();
            if reported.insert(members) {
                errors.push(ValidationError::MountCycle { cycle });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_routes(
    table: &str,
    routes: &[RouteConfig],
    config: &RouteTableConfig,
    errors: &mut Vec<ValidationError>,
) {
    for route in routes {
        if route.method.parse::<HttpMethod>().is_err() {
            errors.push(ValidationError::UnknownMethod {
                table: table.to_string(),
                path: route.path.clone(),
                method: route.method.clone(),
            });
        }

        if let Some(mount) = &route.mount {
            if !config.tables.contains_key(mount) {
                errors.push(ValidationError::UnknownTable {
                    table: table.to_string(),
                    path: route.path.clone(),
                    mount: mount.clone(),
                });
            }
        }

        if route.handler.as_deref().is_some_and(|h| h.trim().is_empty()) {
            errors.push(ValidationError::EmptyHandler {
                table: table.to_string(),
                path: route.path.clone(),
            });
        }
    }
}

/// Depth-first walk over mounts starting at `name`.
/// Returns the cycle (first member repeated at the end) if one is reachable.
fn find_cycle(name: &str, config: &RouteTableConfig, stack: &mut Vec<String>) -> Option<Vec<String>> {
    if let Some(pos) = stack.iter().position(|n| n == name) {
        let mut cycle = stack[pos..].to_vec();
        cycle.push(name.to_string());
        return Some(cycle);
    }

    let table = config.tables.get(name)?;
    stack.push(name.to_string());
    let found = table
        .routes
        .iter()
        .filter_map(|r| r.mount.as_deref())
        .find_map(|mount| find_cycle(mount, config, stack));
    stack.pop();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TableConfig;

    fn table(routes: Vec<RouteConfig>) -> TableConfig {
        TableConfig { routes }
    }

    #[test]
    fn test_valid_table() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::handler("get", "/health", "health"));
        cfg.routes.push(RouteConfig::mount("/api", "api"));
        cfg.tables.insert("api".into(), table(vec![RouteConfig::handler("ALL", "/ping", "ping")]));

        assert!(validate_table(&cfg).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::handler("FETCH", "/a", "a"));
        cfg.routes.push(RouteConfig::mount("/b", "missing"));
        cfg.routes.push(RouteConfig::handler("GET", "/c", " "));

        let errors = validate_table(&cfg).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::UnknownMethod { .. }));
        assert!(matches!(errors[1], ValidationError::UnknownTable { .. }));
        assert!(matches!(errors[2], ValidationError::EmptyHandler { .. }));
    }

    #[test]
    fn test_mount_cycle() {
        let mut cfg = RouteTableConfig::default();
        cfg.routes.push(RouteConfig::mount("/x", "a"));
        cfg.tables.insert("a".into(), table(vec![RouteConfig::mount("/b", "b")]));
        cfg.tables.insert("b".into(), table(vec![RouteConfig::mount("/a", "a")]));

        let errors = validate_table(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MountCycle {
                cycle: vec!["a".into(), "b".into(), "a".into()]
            }]
        );
        assert_eq!(errors[0].to_string(), "mount cycle: a -> b -> a");
    }

    #[test]
    fn test_self_mount_cycle() {
        let mut cfg = RouteTableConfig::default();
        cfg.tables.insert("a".into(), table(vec![RouteConfig::mount("/again", "a")]));

        let errors = validate_table(&cfg).unwrap_err();
        assert!(matches!(&errors[0], ValidationError::MountCycle { cycle } if cycle.len() == 2));
    }
}
