//! Frozen route table.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Lookup cost is bounded by the number of path segments, plus
//!   backtracking when a literal branch dead-ends
//! - Explicit NoMatch rather than silent default

use std::fmt;

use axum::http::Method;

use crate::routing::params::Params;
use crate::routing::pattern::{decode_segment, split_path};
use crate::routing::trie::Node;

/// A registered (method, path) pair, kept for listing and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub method: Method,
    pub path: String,
}

impl fmt::Display for RouteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    pub handler: &'a T,
    pub params: Params,
}

/// Outcome of [`RouteTable::lookup`].
#[derive(Debug)]
pub enum MatchResult<'a, T> {
    Matched(RouteMatch<'a, T>),
    /// Unknown path, or known path without a handler for the method.
    NoMatch,
}

impl<'a, T> MatchResult<'a, T> {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn into_option(self) -> Option<RouteMatch<'a, T>> {
        match self {
            MatchResult::Matched(m) => Some(m),
            MatchResult::NoMatch => None,
        }
    }
}

/// Read-only routing trie produced by [`Router::build`].
///
/// [`Router::build`]: crate::routing::Router::build
pub struct RouteTable<T> {
    root: Node<T>,
    routes: Vec<RouteInfo>,
}

impl<T> RouteTable<T> {
    pub(crate) fn new(root: Node<T>, routes: Vec<RouteInfo>) -> Self {
        Self { root, routes }
    }

    /// Match a request method and path.
    ///
    /// `path` is the raw request path. Each segment is percent-decoded
    /// before it is compared or captured.
    pub fn lookup(&self, method: &Method, path: &str) -> MatchResult<'_, T> {
        let decoded: Vec<_> = split_path(path).map(decode_segment).collect();
        let segments: Vec<&str> = decoded.iter().map(|s| s.as_ref()).collect();
        let mut params = Params::new();

        match self.root.find(&segments, method, &mut params) {
            Some(handler) => MatchResult::Matched(RouteMatch { handler, params }),
            None => MatchResult::NoMatch,
        }
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.root.route_count()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> fmt::Debug for RouteTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .finish()
    }
}
