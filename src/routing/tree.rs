//! Route structure: a segment trie whose leaves are endpoints.
//!
//! # Shape
//! ```text
//! Branch {
//!     Terminal        → Endpoint "/"
//!     Literal("users") → Branch {
//!         Terminal    → Endpoint "/users"
//!         Wildcard    → Branch {
//!             Terminal → Endpoint "/users/*"
//!         }
//!     }
//!     Default         → Endpoint ""   (root only)
//! }
//! ```
//!
//! # Design Decisions
//! - Keys are an enum, so no literal segment can collide with a marker
//! - Children keep insertion order for deterministic rendering
//! - Literal and wildcard positions are fixed at build time; a renderer
//!   tries literals first and never backtracks

use std::fmt::{self, Display, Write as _};

use indexmap::IndexMap;

use crate::routing::endpoint::Endpoint;
use crate::routing::error::RouteResult;
use crate::routing::path::{Segment, WILDCARD};

/// Key of a child in a branch node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Literal path segment.
    Literal(String),
    /// Variable position.
    Wildcard,
    /// Endpoint of the path ending at this node.
    Terminal,
    /// Fallback endpoint; only present on the root.
    Default,
}

impl From<&Segment> for SegmentKind {
    fn from(segment: &Segment) -> Self {
        match segment {
            Segment::Literal(s) => SegmentKind::Literal(s.clone()),
            Segment::Wildcard => SegmentKind::Wildcard,
        }
    }
}

impl Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Literal(s) => f.write_str(s),
            SegmentKind::Wildcard => f.write_str(WILDCARD),
            SegmentKind::Terminal => f.write_str("<endpoint>"),
            SegmentKind::Default => f.write_str("<default>"),
        }
    }
}

/// Node of the route structure.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteNode<H> {
    Endpoint(Endpoint<H>),
    Branch(IndexMap<SegmentKind, RouteNode<H>>),
}

impl<H> Default for RouteNode<H> {
    fn default() -> Self {
        RouteNode::Branch(IndexMap::new())
    }
}

impl<H> RouteNode<H> {
    pub fn as_endpoint(&self) -> Option<&Endpoint<H>> {
        match self {
            RouteNode::Endpoint(endpoint) => Some(endpoint),
            RouteNode::Branch(_) => None,
        }
    }

    /// Children of a branch; `None` for an endpoint.
    pub fn children(&self) -> Option<&IndexMap<SegmentKind, RouteNode<H>>> {
        match self {
            RouteNode::Branch(children) => Some(children),
            RouteNode::Endpoint(_) => None,
        }
    }

    pub fn get(&self, key: &SegmentKind) -> Option<&RouteNode<H>> {
        self.children().and_then(|children| children.get(key))
    }

    /// Child for a literal segment.
    pub fn child(&self, segment: &str) -> Option<&RouteNode<H>> {
        self.get(&SegmentKind::Literal(segment.to_string()))
    }

    pub fn wildcard(&self) -> Option<&RouteNode<H>> {
        self.get(&SegmentKind::Wildcard)
    }

    /// Endpoint for the path ending at this node.
    pub fn endpoint(&self) -> Option<&Endpoint<H>> {
        self.get(&SegmentKind::Terminal).and_then(RouteNode::as_endpoint)
    }

    pub fn default_endpoint(&self) -> Option<&Endpoint<H>> {
        self.get(&SegmentKind::Default).and_then(RouteNode::as_endpoint)
    }

    /// Walk a path of segments from this node.
    pub fn find(&self, segments: &[Segment]) -> Option<&RouteNode<H>> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.get(&SegmentKind::from(segment)))
    }

    /// Every endpoint below this node, depth-first in insertion order.
    pub fn endpoints(&self) -> Vec<&Endpoint<H>> {
        let mut found = Vec::new();
        self.collect_endpoints(&mut found);
        found
    }

    fn collect_endpoints<'a>(&'a self, found: &mut Vec<&'a Endpoint<H>>) {
        match self {
            RouteNode::Endpoint(endpoint) => found.push(endpoint),
            RouteNode::Branch(children) => {
                for child in children.values() {
                    child.collect_endpoints(found);
                }
            }
        }
    }

    /// Return a tree with the endpoint under `key` at the end of `segments`
    /// replaced by `update(existing)`. Missing branches are created; existing
    /// children keep their position.
    pub(crate) fn upsert_endpoint<F>(
        self,
        segments: &[Segment],
        key: SegmentKind,
        update: F,
    ) -> RouteResult<Self>
    where
        F: FnOnce(Option<&Endpoint<H>>) -> RouteResult<Endpoint<H>>,
    {
        // Only Terminal and Default keys hold endpoints, so nodes reached
        // through segments are branches.
        let mut children = match self {
            RouteNode::Branch(children) => children,
            RouteNode::Endpoint(_) => IndexMap::new(),
        };

        match segments.split_first() {
            None => {
                let endpoint = update(children.get(&key).and_then(RouteNode::as_endpoint))?;
                children.insert(key, RouteNode::Endpoint(endpoint));
            }
            Some((first, rest)) => {
                let child_key = SegmentKind::from(first);
                let child = children
                    .get_mut(&child_key)
                    .map(std::mem::take)
                    .unwrap_or_default();
                children.insert(child_key, child.upsert_endpoint(rest, key, update)?);
            }
        }

        Ok(RouteNode::Branch(children))
    }
}

impl<H: Display + PartialEq> RouteNode<H> {
    /// Indented text outline of the structure.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);

        match self {
            RouteNode::Endpoint(endpoint) => {
                for route in endpoint.unique_routes() {
                    let methods = if route.methods.iter().all(|m| m.is_empty()) {
                        "*".to_string()
                    } else {
                        route.methods.join("|")
                    };
                    let _ = write!(out, "{indent}{methods} => {}", route.handler);
                    if !route.vars.is_empty() {
                        let vars: Vec<String> =
                            route.vars.iter().map(|(k, v)| format!("{k}:{v}")).collect();
                        let _ = write!(out, " {{{}}}", vars.join(", "));
                    }
                    out.push('\n');
                }
            }
            RouteNode::Branch(children) => {
                for (key, child) in children {
                    match (key, child) {
                        (SegmentKind::Terminal, RouteNode::Endpoint(endpoint))
                        | (SegmentKind::Default, RouteNode::Endpoint(endpoint)) => {
                            let label = if endpoint.path().is_empty() {
                                "<default>"
                            } else {
                                endpoint.path()
                            };
                            let _ = writeln!(out, "{indent}[{label}]");
                        }
                        _ => {
                            let _ = writeln!(out, "{indent}{key}/");
                        }
                    }
                    child.write_outline(out, depth + 1);
                }
            }
        }
    }
}
