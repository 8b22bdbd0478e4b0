//! Shared fixtures for integration tests.

use serde_json::{json, Value};

/// The users/photos/export route set, in declaration order.
pub fn routes() -> Vec<(&'static str, Value)> {
    vec![
        ("  GET    /  ", json!({"controller": "InfoController"})),
        ("GET      /users", json!({"controller": "UserController", "action": "listAction"})),
        ("POST     /users", json!({"controller": "UserController", "action": "addAction"})),
        ("GET      /users/{id}", json!({"controller": "UserController", "action": "getAction"})),
        ("POST|PUT /users/{id}", json!({"controller": "UserController", "action": "updateAction"})),
        ("DELETE   /users/{id}", json!({"controller": "UserController", "action": "deleteAction"})),
        ("default", json!({"action": "NotFoundAction"})),
        ("POST     /export", json!({"include": "scripts/export.php"})),
        ("GET      /users/{id}/photos", json!({"action": "ListPhotosAction"})),
        ("POST     /users/{id}/photos", json!({"action": "AddPhotosAction"})),
    ]
}

/// The same route set as a TOML route file.
#[allow(dead_code)]
pub const ROUTES_TOML: &str = r#"
[routes]
"  GET    /  "           = { controller = "InfoController" }
"GET      /users"        = { controller = "UserController", action = "listAction" }
"POST     /users"        = { controller = "UserController", action = "addAction" }
"GET      /users/{id}"   = { controller = "UserController", action = "getAction" }
"POST|PUT /users/{id}"   = { controller = "UserController", action = "updateAction" }
"DELETE   /users/{id}"   = { controller = "UserController", action = "deleteAction" }
default                  = { action = "NotFoundAction" }
"POST     /export"       = { include = "scripts/export.php" }
"GET      /users/{id}/photos" = { action = "ListPhotosAction" }
"POST     /users/{id}/photos" = { action = "AddPhotosAction" }
"#;
