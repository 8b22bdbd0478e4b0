//! Route file schema.
//!
//! ```toml
//! prefix = "/app"
//!
//! [routes]
//! "GET /users"           = { controller = "UserController", action = "listAction" }
//! "POST|PUT /users/{id}" = { controller = "UserController", action = "updateAction" }
//! default                = { action = "NotFoundAction" }
//!
//! [[groups]]
//! prefix = "/admin"
//!
//! [groups.routes]
//! "GET /stats" = { action = "StatsAction" }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::key::{RouteKey, DEFAULT_KEY};
use crate::routing::table::RouteTable;

/// Root of a route file.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Prepended to every route path, including groups.
    pub prefix: String,

    /// Route key → handler descriptor, in file order.
    pub routes: IndexMap<String, Value>,

    /// Routes sharing an extra prefix.
    pub groups: Vec<GroupConfig>,
}

/// A group of routes below a common prefix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GroupConfig {
    pub prefix: String,

    #[serde(default)]
    pub routes: IndexMap<String, Value>,
}

impl RoutesConfig {
    /// Convert into a route table: top-level routes first, then groups.
    ///
    /// Two keys resolving to the same normalized route are reported as a
    /// duplicate instead of one silently replacing the other.
    pub fn into_table(self) -> RouteResult<RouteTable<Value>> {
        let mut table = RouteTable::with_prefix(self.prefix.clone());
        add_routes(&mut table, self.routes)?;

        for group in self.groups {
            let mut sub = RouteTable::with_prefix(format!("{}{}", self.prefix, group.prefix));
            add_routes(&mut sub, group.routes)?;

            for (key, handler) in sub {
                if table.contains_key(&key) {
                    return Err(duplicate(&key));
                }
                table.insert(key, handler);
            }
        }

        Ok(table)
    }
}

fn add_routes(table: &mut RouteTable<Value>, routes: IndexMap<String, Value>) -> RouteResult<()> {
    for (key, handler) in routes {
        let previous = match RouteKey::parse(&key)? {
            RouteKey::Default => table.set_default(handler),
            RouteKey::Route { methods, path } => {
                let methods: Vec<&str> = methods.iter().map(String::as_str).collect();
                table.add_route(&methods, &path, handler)
            }
        };

        if previous.is_some() {
            return Err(duplicate(&key));
        }
    }

    Ok(())
}

fn duplicate(key: &str) -> RouteError {
    match RouteKey::parse(key) {
        Ok(RouteKey::Route { methods, path }) => RouteError::DuplicateRoute {
            method: methods.join("|").to_uppercase(),
            path,
        },
        _ if key.trim() == DEFAULT_KEY => RouteError::DuplicateRoute {
            method: String::new(),
            path: String::new(),
        },
        _ => RouteError::InvalidRoute { key: key.to_string() },
    }
}
