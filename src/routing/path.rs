//! Path pattern parsing.
//!
//! # Responsibilities
//! - Split a path pattern into `/`-delimited segments
//! - Recognise variable segments (`:name` or `{name}`)
//! - Record the segment index of every variable
//!
//! # Design Decisions
//! - Pure function, no state, no logging: safe to call from anywhere
//! - `/` is the root and has no segments
//! - Variables become wildcard segments; the name only lives in the var map
//! - No escaping: a literal `*` segment lands on the wildcard position

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};

static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?::(?P<colon>[0-9A-Za-z_]+)|\{(?P<brace>[0-9A-Za-z_]+)\})$")
        .expect("variable pattern is valid")
});

/// Marker used for a variable position in normalized paths.
pub const WILDCARD: &str = "*";

/// Variable name → zero-based segment index.
pub type VariableMap = IndexMap<String, usize>;

/// A single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matched by string equality.
    Literal(String),
    /// Matches any value at this position.
    Wildcard,
}

impl Segment {
    pub fn as_str(&self) -> &str {
        match self {
            Segment::Literal(s) => s,
            Segment::Wildcard => WILDCARD,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    pub segments: Vec<Segment>,
    pub vars: VariableMap,
}

impl ParsedPath {
    /// Normalized path, variables rendered as `*` (e.g. `/users/*/photos`).
    pub fn pattern(&self) -> String {
        let parts: Vec<&str> = self.segments.iter().map(Segment::as_str).collect();
        format!("/{}", parts.join("/"))
    }

    /// Path with variable names put back in `{name}` form.
    ///
    /// Wildcard positions without a recorded name stay `*`.
    pub fn template(&self) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .enumerate()
            .map(|(index, segment)| match segment {
                Segment::Literal(s) => s.clone(),
                Segment::Wildcard => self
                    .vars
                    .iter()
                    .find(|(_, i)| **i == index)
                    .map(|(name, _)| format!("{{{}}}", name))
                    .unwrap_or_else(|| WILDCARD.to_string()),
            })
            .collect();

        format!("/{}", parts.join("/"))
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split a path pattern into segments and extract variables.
///
/// ```
/// use switch_route::routing::path::{parse_path, Segment};
///
/// let parsed = parse_path("/users/{id}/photos").unwrap();
/// assert_eq!(parsed.segments[1], Segment::Wildcard);
/// assert_eq!(parsed.vars["id"], 1);
/// ```
pub fn parse_path(path: &str) -> RouteResult<ParsedPath> {
    split_path(path).map(|(parsed, _)| parsed)
}

/// Like [`parse_path`], also returning variable names that appeared more
/// than once. The last occurrence of a repeated name wins.
pub(crate) fn split_path(path: &str) -> RouteResult<(ParsedPath, Vec<String>)> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(RouteError::InvalidPath { path: path.to_string() });
    };

    let mut parsed = ParsedPath::default();
    let mut repeated = Vec::new();

    if rest.is_empty() {
        return Ok((parsed, repeated));
    }

    for (index, raw) in rest.split('/').enumerate() {
        if let Some(caps) = VARIABLE.captures(raw) {
            let name = caps
                .name("colon")
                .or_else(|| caps.name("brace"))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            if parsed.vars.insert(name.clone(), index).is_some() {
                repeated.push(name);
            }
            parsed.segments.push(Segment::Wildcard);
        } else if raw == WILDCARD {
            parsed.segments.push(Segment::Wildcard);
        } else {
            parsed.segments.push(Segment::Literal(raw.to_string()));
        }
    }

    Ok((parsed, repeated))
}
