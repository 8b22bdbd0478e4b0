//! Build-time route compiler.
//!
//! Turns `METHOD /path/{var}` → handler entries into a segment trie whose
//! leaves are [`Endpoint`]s, so a generated dispatcher can match a request
//! in O(depth) instead of scanning every pattern.

pub mod config;
pub mod observability;
pub mod report;
pub mod routing;

pub use config::RoutesConfig;
pub use routing::{build, Endpoint, RouteError, RouteNode, RouteTable, SegmentKind};
