//! Endpoint: every method registered on one concrete path.
//!
//! # Responsibilities
//! - Map uppercase method names to handler descriptors and variable maps
//! - Reject a method registered twice
//! - Group methods that share identical behavior
//!
//! # Design Decisions
//! - Immutable: `with_route` returns a new endpoint, the receiver is untouched
//! - Insertion order is kept so generated code is deterministic
//! - Handler descriptors are opaque; only structural equality is used

use indexmap::IndexMap;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::path::VariableMap;

/// Method key of the fallback route.
pub const DEFAULT_METHOD: &str = "";

/// Leaf of the route structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint<H> {
    path: String,
    routes: IndexMap<String, H>,
    vars: IndexMap<String, VariableMap>,
}

/// Methods sharing one handler and one variable map.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueRoute<'a, H> {
    pub methods: Vec<String>,
    pub handler: &'a H,
    pub vars: &'a VariableMap,
}

impl<H> Endpoint<H> {
    /// Create an endpoint without routes.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            routes: IndexMap::new(),
            vars: IndexMap::new(),
        }
    }

    /// Normalized path, wildcards as `*`. Empty for the fallback endpoint.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Registered methods, excluding the fallback sentinel.
    pub fn allowed_methods(&self) -> Vec<&str> {
        self.routes
            .keys()
            .map(String::as_str)
            .filter(|m| *m != DEFAULT_METHOD)
            .collect()
    }

    /// Method → handler, in registration order.
    pub fn routes(&self) -> &IndexMap<String, H> {
        &self.routes
    }

    pub fn route(&self, method: &str) -> Option<&H> {
        self.routes.get(&method.to_uppercase())
    }

    /// Variable map of a registered method.
    pub fn vars(&self, method: &str) -> RouteResult<&VariableMap> {
        let method = method.to_uppercase();
        self.vars
            .get(&method)
            .ok_or_else(|| RouteError::UnknownMethod {
                method,
                path: self.path.clone(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

impl<H: Clone> Endpoint<H> {
    /// Return a copy of this endpoint with `method` added.
    ///
    /// The method is uppercased first, so `get` and `GET` collide.
    pub fn with_route(&self, method: &str, handler: H, vars: VariableMap) -> RouteResult<Self> {
        let method = method.to_uppercase();

        if self.routes.contains_key(&method) {
            return Err(RouteError::DuplicateRoute {
                method,
                path: self.path.clone(),
            });
        }

        let mut copy = self.clone();
        copy.routes.insert(method.clone(), handler);
        copy.vars.insert(method, vars);

        Ok(copy)
    }
}

impl<H: PartialEq> Endpoint<H> {
    /// Group methods with equal handler and vars.
    ///
    /// Every registered method appears in exactly one group. Groups are
    /// ordered by their first method; methods within a group keep their
    /// registration order. Computed fresh on every call.
    pub fn unique_routes(&self) -> Vec<UniqueRoute<'_, H>> {
        let mut queue: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        let mut groups = Vec::new();

        while let Some(&first) = queue.first() {
            let handler = &self.routes[first];
            let vars = &self.vars[first];

            let (methods, rest): (Vec<&str>, Vec<&str>) = queue
                .into_iter()
                .partition(|m| self.routes[*m] == *handler && self.vars[*m] == *vars);

            groups.push(UniqueRoute {
                methods: methods.into_iter().map(str::to_string).collect(),
                handler,
                vars,
            });
            queue = rest;
        }

        groups
    }
}
