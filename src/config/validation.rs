//! Route file validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route key against the `METHOD /path` grammar
//! - Check prefixes are usable path fragments
//! - Reject files without any route
//! - Detect conflicting routes without compiling the structure
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Conflicts are only checked once keys and prefixes are valid
//! - Pure function: RoutesConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::RoutesConfig;
use crate::routing::error::RouteError;
use crate::routing::key::{RouteKey, DEFAULT_KEY};

/// A single problem found in a route file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Prefix is not empty and doesn't look like `/segment`.
    #[error("Invalid prefix '{0}': should start with '/' and not end with '/'")]
    InvalidPrefix(String),

    /// Route key could not be parsed.
    #[error("{0}")]
    InvalidKey(RouteError),

    /// The fallback route can only be set at the top level.
    #[error("Group '{0}' cannot define a default route")]
    DefaultInGroup(String),

    /// Routes conflict once compiled.
    #[error("{0}")]
    Conflict(RouteError),

    /// No routes at all, e.g. a file read while truncated.
    #[error("Route file defines no routes")]
    Empty,
}

/// Validate a route file.
pub fn validate_config(config: &RoutesConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let route_count =
        config.routes.len() + config.groups.iter().map(|g| g.routes.len()).sum::<usize>();
    if route_count == 0 {
        errors.push(ValidationError::Empty);
    }

    check_prefix(&config.prefix, &mut errors);
    check_keys(config.routes.keys(), &mut errors);

    for group in &config.groups {
        check_prefix(&group.prefix, &mut errors);
        if group.prefix.is_empty() {
            errors.push(ValidationError::InvalidPrefix(String::new()));
        }
        if group.routes.contains_key(DEFAULT_KEY) {
            errors.push(ValidationError::DefaultInGroup(group.prefix.clone()));
        }
        check_keys(group.routes.keys(), &mut errors);
    }

    if errors.is_empty() {
        if let Err(e) = config.clone().into_table().and_then(|t| t.check()) {
            errors.push(ValidationError::Conflict(e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_prefix(prefix: &str, errors: &mut Vec<ValidationError>) {
    if prefix.is_empty() {
        return;
    }
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::InvalidPrefix(prefix.to_string()));
    }
}

fn check_keys<'a>(keys: impl Iterator<Item = &'a String>, errors: &mut Vec<ValidationError>) {
    for key in keys {
        if let Err(e) = RouteKey::parse(key) {
            errors.push(ValidationError::InvalidKey(e));
        }
    }
}
