//! Route table and structure builder.
//!
//! # Responsibilities
//! - Collect `METHOD /path` → handler entries in insertion order
//! - Prefix routes, individually or per group
//! - Compile the entries into a [`RouteNode`] tree
//!
//! # Design Decisions
//! - Keys are stored normalized (whitespace runs collapsed)
//! - Building is all-or-nothing: the first bad entry aborts it
//! - Same input, same order → structurally identical tree

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::routing::endpoint::{Endpoint, DEFAULT_METHOD};
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::key::{normalize_key, RouteKey, DEFAULT_KEY};
use crate::routing::path::{split_path, VariableMap};
use crate::routing::tree::{RouteNode, SegmentKind};

/// Ordered collection of routes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable<H> {
    prefix: String,
    entries: IndexMap<String, H>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Table whose `add_*` helpers prepend `prefix` to every path.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Add or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl AsRef<str>, handler: H) -> Option<H> {
        self.entries.insert(normalize_key(key.as_ref()), handler)
    }

    pub fn get(&self, key: &str) -> Option<&H> {
        self.entries.get(&normalize_key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<H> {
        self.entries.shift_remove(&normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &H)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a route for one or more methods on a path below the prefix.
    ///
    /// Returns the handler previously stored under the same key.
    pub fn add_route(&mut self, methods: &[&str], path: &str, handler: H) -> Option<H> {
        let full_path = if path == "/" && !self.prefix.is_empty() {
            self.prefix.clone()
        } else {
            format!("{}{}", self.prefix, path)
        };
        self.insert(format!("{} {}", methods.join("|"), full_path), handler)
    }

    pub fn add_get(&mut self, path: &str, handler: H) {
        self.add_route(&["GET"], path, handler);
    }

    pub fn add_post(&mut self, path: &str, handler: H) {
        self.add_route(&["POST"], path, handler);
    }

    pub fn add_put(&mut self, path: &str, handler: H) {
        self.add_route(&["PUT"], path, handler);
    }

    pub fn add_delete(&mut self, path: &str, handler: H) {
        self.add_route(&["DELETE"], path, handler);
    }

    pub fn add_patch(&mut self, path: &str, handler: H) {
        self.add_route(&["PATCH"], path, handler);
    }

    pub fn add_head(&mut self, path: &str, handler: H) {
        self.add_route(&["HEAD"], path, handler);
    }

    pub fn add_options(&mut self, path: &str, handler: H) {
        self.add_route(&["OPTIONS"], path, handler);
    }

    /// Set the fallback route.
    pub fn set_default(&mut self, handler: H) -> Option<H> {
        self.insert(DEFAULT_KEY, handler)
    }

    /// Add routes sharing a common prefix.
    ///
    /// ```
    /// use switch_route::RouteTable;
    ///
    /// let mut routes = RouteTable::new();
    /// routes.group("/api", |api| {
    ///     api.add_get("/status", "status");
    /// });
    /// assert!(routes.contains_key("GET /api/status"));
    /// ```
    pub fn group<F>(&mut self, prefix: &str, build: F)
    where
        F: FnOnce(&mut RouteTable<H>),
    {
        let mut sub = RouteTable::with_prefix(format!("{}{}", self.prefix, prefix));
        build(&mut sub);
        self.extend(sub);
    }
}

impl<H> RouteTable<H> {
    /// Validate the entries without building; see [`check`].
    pub fn check(&self) -> RouteResult<()> {
        check(self.entries.keys())
    }
}

impl<H: Clone> RouteTable<H> {
    /// Compile the table into a route structure.
    pub fn structure(&self) -> RouteResult<RouteNode<H>> {
        build(self.iter().map(|(key, handler)| (key, handler.clone())))
    }
}

impl<K: AsRef<str>, H> Extend<(K, H)> for RouteTable<H> {
    fn extend<I: IntoIterator<Item = (K, H)>>(&mut self, iter: I) {
        for (key, handler) in iter {
            self.insert(key, handler);
        }
    }
}

impl<H> IntoIterator for RouteTable<H> {
    type Item = (String, H);
    type IntoIter = indexmap::map::IntoIter<String, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: AsRef<str>, H> FromIterator<(K, H)> for RouteTable<H> {
    fn from_iter<I: IntoIterator<Item = (K, H)>>(iter: I) -> Self {
        let mut table = RouteTable::new();
        table.extend(iter);
        table
    }
}

/// Build a route structure from ordered `(key, handler)` entries.
///
/// Every path gets an endpoint under [`SegmentKind::Terminal`] at the end of
/// its segments; the `default` entry lands under [`SegmentKind::Default`] on
/// the root.
pub fn build<K, H, I>(entries: I) -> RouteResult<RouteNode<H>>
where
    K: AsRef<str>,
    H: Clone,
    I: IntoIterator<Item = (K, H)>,
{
    let mut root = RouteNode::default();
    let mut route_count = 0usize;

    for (key, handler) in entries {
        let key = key.as_ref();

        match RouteKey::parse(key)? {
            RouteKey::Default => {
                root = root.upsert_endpoint(&[], SegmentKind::Default, |existing| {
                    existing
                        .cloned()
                        .unwrap_or_else(|| Endpoint::new(""))
                        .with_route(DEFAULT_METHOD, handler, VariableMap::new())
                })?;
                route_count += 1;
                tracing::debug!("Registered default route");
            }
            RouteKey::Route { methods, path } => {
                let (parsed, repeated) = split_path(&path)?;
                for name in &repeated {
                    tracing::warn!(
                        path = %path,
                        variable = %name,
                        "Variable name repeated in path; last occurrence wins"
                    );
                }

                root = root.upsert_endpoint(&parsed.segments, SegmentKind::Terminal, |existing| {
                    let mut endpoint = existing
                        .cloned()
                        .unwrap_or_else(|| Endpoint::new(parsed.pattern()));
                    for method in &methods {
                        endpoint =
                            endpoint.with_route(method, handler.clone(), parsed.vars.clone())?;
                    }
                    Ok(endpoint)
                })?;

                tracing::debug!(
                    methods = %methods.join("|"),
                    path = %parsed.pattern(),
                    vars = parsed.vars.len(),
                    "Registered route"
                );
                route_count += methods.len();
            }
        }
    }

    tracing::info!(
        endpoints = root.endpoints().len(),
        routes = route_count,
        "Route structure built"
    );

    Ok(root)
}

/// Report the first error [`build`] would raise, without building or logging.
///
/// Checks key grammar, paths and duplicate methods per normalized path.
pub fn check<K, I>(keys: I) -> RouteResult<()>
where
    K: AsRef<str>,
    I: IntoIterator<Item = K>,
{
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for key in keys {
        let (methods, path) = match RouteKey::parse(key.as_ref())? {
            RouteKey::Default => (vec![DEFAULT_METHOD.to_string()], String::new()),
            RouteKey::Route { methods, path } => (methods, split_path(&path)?.0.pattern()),
        };

        for method in methods {
            let method = method.to_uppercase();
            if !seen.insert((method.clone(), path.clone())) {
                return Err(RouteError::DuplicateRoute { method, path });
            }
        }
    }

    Ok(())
}
