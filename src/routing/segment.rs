//! Path segmentation.
//!
//! # Responsibilities
//! - Split a path on `/`, dropping empty pieces
//! - Tag `:name` pieces as parameters
//! - Strip the query string from lookup paths
//!
//! # Design Decisions
//! - Leading, trailing and doubled slashes are tolerated
//! - No URL decoding: segment text is taken verbatim

use std::fmt;

/// Marker that turns a path piece into a parameter.
pub const PARAM_MARKER: char = ':';

/// A parsed piece of a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Literal text, or the parameter name without its marker.
    pub value: String,
    /// True if the piece started with the parameter marker.
    pub is_param: bool,
}

impl Segment {
    /// Parse a single non-empty path piece.
    pub fn parse(piece: &str) -> Self {
        match piece.strip_prefix(PARAM_MARKER) {
            Some(name) => Self {
                value: name.to_string(),
                is_param: true,
            },
            None => Self {
                value: piece.to_string(),
                is_param: false,
            },
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_param {
            write!(f, "{}{}", PARAM_MARKER, self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// Split a route path into tagged segments.
pub fn parse_route_path(path: &str) -> Vec<Segment> {
    split_path(path).map(Segment::parse).collect()
}

/// Split a path into its non-empty pieces.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|piece| !piece.is_empty())
}

/// Drop everything from the first `?` onwards.
pub fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(idx) => &path[..idx],
        None => path,
    }
}
