//! Route file management.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (key grammar, prefixes, conflicts)
//!     → RoutesConfig (validated)
//!     → into_table() → RouteTable → structure()
//!
//! On change (watch mode):
//!     watcher.rs detects write
//!     → loader.rs loads new file
//!     → validation.rs validates
//!     → new RoutesConfig sent to the consumer
//! ```
//!
//! # Design Decisions
//! - Table order in the file is route order in the structure
//! - Handlers are arbitrary TOML values, compared structurally
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{GroupConfig, RoutesConfig};
pub use validation::{validate_config, ValidationError};
