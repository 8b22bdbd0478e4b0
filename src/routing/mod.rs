//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route entries ("METHOD /path" → handler)
//!     → table.rs (ordered collection, prefixes, groups)
//!     → key.rs (validate "METHOD|METHOD /path" or "default")
//!     → path.rs (split segments, extract variables)
//!     → endpoint.rs (merge methods per path, reject duplicates)
//!     → tree.rs (segment trie with endpoint leaves)
//!
//! Consumers (renderers, code generators):
//!     RouteNode tree
//!     → walk branches: literal children first, then wildcard
//!     → Endpoint::unique_routes() for one code path per behavior
//! ```
//!
//! # Design Decisions
//! - Structure compiled once, immutable afterwards
//! - No regex at match time: literal vs variable decided while building
//! - Deterministic: same entries in same order give the same tree
//! - Any invalid entry aborts the whole build

pub mod endpoint;
pub mod error;
pub mod key;
pub mod path;
pub mod registry;
pub mod table;
pub mod tree;

pub use endpoint::{Endpoint, UniqueRoute, DEFAULT_METHOD};
pub use error::{RouteError, RouteResult};
pub use key::{RouteKey, DEFAULT_KEY};
pub use path::{parse_path, ParsedPath, Segment, VariableMap};
pub use registry::CompiledRoutes;
pub use table::{build, check, RouteTable};
pub use tree::{RouteNode, SegmentKind};
