//! Route table schema definitions.
//!
//! This module defines the structure of a route table file.
//! All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::ParamConflictPolicy;

/// Root of a route table file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Router-wide settings.
    pub settings: RouterSettings,

    /// Top-level routes.
    pub routes: Vec<RouteConfig>,

    /// Named tables that routes can mount.
    pub tables: BTreeMap<String, TableConfig>,
}

/// Router-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterSettings {
    /// Behaviour when two routes name the same parameter slot differently.
    pub param_conflict: ParamConflictPolicy,
}

/// A named group of routes that can be mounted under a path.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub routes: Vec<RouteConfig>,
}

/// One route record.
///
/// Exactly one of `handler` and `mount` must be set.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Path pattern, e.g. "/users/:id".
    pub path: String,

    /// HTTP method, or "ALL". Case-insensitive.
    #[serde(default = "default_method")]
    pub method: String,

    /// Handler name returned on a match.
    #[serde(default)]
    pub handler: Option<String>,

    /// Name of a table to mount at `path`.
    #[serde(default)]
    pub mount: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl RouteConfig {
    pub fn handler(method: &str, path: &str, handler: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            handler: Some(handler.to_string()),
            mount: None,
        }
    }

    pub fn mount(path: &str, table: &str) -> Self {
        Self {
            path: path.to_string(),
            method: "ALL".to_string(),
            handler: None,
            mount: Some(table.to_string()),
        }
    }
}
