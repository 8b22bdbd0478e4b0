//! Route key grammar.
//!
//! A key is either `METHOD[|METHOD...] /path` or the literal `default`,
//! which names the fallback route.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};

/// Key of the fallback route.
pub const DEFAULT_KEY: &str = "default";

// Whitespace is ASCII only: a non-breaking space is part of a token.
static KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[\t\n\x0B\x0C\r ]*",
        r"(?P<methods>[0-9A-Za-z_]+(?:\|[0-9A-Za-z_]+)*)",
        r"[\t\n\x0B\x0C\r ]+",
        r"(?P<path>/[^\t\n\x0B\x0C\r ]*)",
        r"[\t\n\x0B\x0C\r ]*$",
    ))
    .expect("route key pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\t\n\x0B\x0C\r ]{2,}").expect("whitespace pattern is valid"));

/// A parsed route key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKey {
    /// The fallback route.
    Default,
    /// One or more methods on a path pattern.
    Route { methods: Vec<String>, path: String },
}

impl RouteKey {
    /// Parse a raw key. Methods are returned as written; the endpoint
    /// uppercases them.
    pub fn parse(key: &str) -> RouteResult<Self> {
        if key == DEFAULT_KEY {
            return Ok(RouteKey::Default);
        }

        let caps = KEY
            .captures(key)
            .ok_or_else(|| RouteError::InvalidRoute { key: key.to_string() })?;

        let methods = caps["methods"].split('|').map(str::to_string).collect();
        let path = caps["path"].to_string();

        Ok(RouteKey::Route { methods, path })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, RouteKey::Default)
    }
}

/// Collapse runs of whitespace in a key to a single space.
///
/// `"GET    /users"` and `"GET /users"` name the same entry.
pub fn normalize_key(key: &str) -> String {
    WHITESPACE_RUN.replace_all(key, " ").into_owned()
}
