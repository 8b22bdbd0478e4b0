//! Build summaries for the command line.

use serde::Serialize;

use crate::routing::endpoint::DEFAULT_METHOD;
use crate::routing::path::VariableMap;
use crate::routing::tree::RouteNode;

/// Counts describing a built structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Distinct paths, the fallback included.
    pub endpoints: usize,
    /// Method registrations.
    pub routes: usize,
    /// Code paths after merging methods with identical behavior.
    pub unique_routes: usize,
    pub has_default: bool,
}

/// One group of methods sharing a handler on one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary<'a, H> {
    pub path: &'a str,
    pub methods: Vec<String>,
    pub handler: &'a H,
    pub vars: &'a VariableMap,
}

impl BuildStats {
    pub fn of<H: PartialEq>(root: &RouteNode<H>) -> Self {
        let endpoints = root.endpoints();

        Self {
            endpoints: endpoints.len(),
            routes: endpoints.iter().map(|e| e.len()).sum(),
            unique_routes: endpoints.iter().map(|e| e.unique_routes().len()).sum(),
            has_default: root.default_endpoint().is_some(),
        }
    }
}

/// Flatten a structure into unique route groups, depth-first.
///
/// The fallback route is listed with an empty method list.
pub fn summarize<H: PartialEq>(root: &RouteNode<H>) -> Vec<RouteSummary<'_, H>> {
    root.endpoints()
        .into_iter()
        .flat_map(|endpoint| {
            endpoint.unique_routes().into_iter().map(move |route| RouteSummary {
                path: endpoint.path(),
                methods: route
                    .methods
                    .into_iter()
                    .filter(|m| m != DEFAULT_METHOD)
                    .collect(),
                handler: route.handler,
                vars: route.vars,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::table::build;

    #[test]
    fn test_stats() {
        let root = build([
            ("GET /users", "list"),
            ("POST|PUT /users/{id}", "update"),
            ("GET /users/{id}", "get"),
            ("default", "missing"),
        ])
        .unwrap();

        assert_eq!(
            BuildStats::of(&root),
            BuildStats {
                endpoints: 3,
                routes: 5,
                unique_routes: 4,
                has_default: true,
            }
        );
    }

    #[test]
    fn test_summarize() {
        let root = build([("POST|PUT /users/{id}", "update"), ("default", "missing")]).unwrap();
        let summary = summarize(&root);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].path, "/users/*");
        assert_eq!(summary[0].methods, vec!["POST", "PUT"]);
        assert_eq!(summary[0].vars.get("id"), Some(&1));
        assert_eq!(summary[1].path, "");
        assert!(summary[1].methods.is_empty());

        let json = serde_json::to_value(&summary[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "/users/*",
                "methods": ["POST", "PUT"],
                "handler": "update",
                "vars": {"id": 1}
            })
        );
    }
}
