//! Route table loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::builder::build_router;
use crate::config::schema::RouteTableConfig;
use crate::config::validation::{validate_table, ValidationError};
use crate::routing::{RouterError, RoutingTrie};

/// Error type for route table loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read route table")]
    Io(#[source] std::io::Error),

    #[error("failed to parse route table")]
    Parse(#[source] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("failed to build routing trie")]
    Build(#[source] RouterError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a route table from TOML text.
pub fn parse_table(content: &str) -> Result<RouteTableConfig, ConfigError> {
    let config: RouteTableConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_table(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate a route table from a TOML file.
pub fn load_table(path: &Path) -> Result<RouteTableConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_table(&content)
}

/// Load a route table file and build its trie.
pub fn load_router(path: &Path) -> Result<RoutingTrie<String>, ConfigError> {
    let config = load_table(path)?;
    build_router(&config).map_err(ConfigError::Build)
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_parse_error() {
        let err = parse_table("[[routes]\npath = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_table(
            r#"
            [[routes]]
            path = "/a"
            method = "FETCH"
            handler = "a"

            [[routes]]
            path = "/b"
            mount = "nowhere"
            "#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation failed: <root>: route '/a' has unknown method 'FETCH', \
             <root>: route '/b' mounts unknown table 'nowhere'"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = load_table(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_cause_reported_once() {
        let err = parse_table("[[routes]\npath = ").unwrap_err();
        assert_eq!(err.to_string(), "failed to parse route table");
        let cause = err.source().expect("parse error keeps its cause").to_string();
        assert!(!cause.is_empty());
        assert!(!err.to_string().contains(&cause));

        let err = ConfigError::Build(RouterError::HandlerExists { path: "/a".into() });
        assert_eq!(err.to_string(), "failed to build routing trie");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("handler already exists for route '/a'")
        );
    }
}
