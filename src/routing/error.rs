//! Route compilation error definitions.

use thiserror::Error;

/// Errors raised while parsing route keys, building the structure or
/// querying an endpoint.
///
/// All of these are configuration mistakes. They surface when the route
/// structure is compiled, never while serving requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Route key does not follow the `METHOD /path` grammar.
    #[error("Invalid routing key '{key}': should be 'METHOD /path'")]
    InvalidRoute { key: String },

    /// Path does not start with a slash.
    #[error("Invalid path '{path}': should start with '/'")]
    InvalidPath { path: String },

    /// Same method registered twice for one path.
    #[error("Duplicate route for '{method} {path}'")]
    DuplicateRoute { method: String, path: String },

    /// Vars requested for a method the endpoint doesn't have.
    #[error("Method '{method}' not available for endpoint '{path}'")]
    UnknownMethod { method: String, path: String },
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
