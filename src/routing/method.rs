//! HTTP method handling for route leaves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Method a route is registered for.
///
/// `All` is a sentinel that matches every incoming method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
    All,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
            HttpMethod::All => "ALL",
        }
    }

    /// Returns true if an incoming request method is accepted.
    /// The incoming method is compared case-insensitively.
    pub fn accepts(&self, incoming: &str) -> bool {
        match self {
            HttpMethod::All => true,
            registered => registered.as_str().eq_ignore_ascii_case(incoming),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for method names outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method '{0}'")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "CONNECT" => Ok(HttpMethod::Connect),
            "TRACE" => Ok(HttpMethod::Trace),
            "ALL" => Ok(HttpMethod::All),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert_eq!("ALL".parse::<HttpMethod>().unwrap(), HttpMethod::All);
        assert!("PROPFIND".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_accepts() {
        assert!(HttpMethod::Get.accepts("GET"));
        assert!(HttpMethod::Get.accepts("get"));
        assert!(!HttpMethod::Get.accepts("POST"));
        assert!(!HttpMethod::Get.accepts(""));

        assert!(HttpMethod::All.accepts("PROPFIND"));
        assert!(HttpMethod::All.accepts(""));
    }
}
