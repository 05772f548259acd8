//! Registration errors.
//!
//! Every variant is raised at startup while routes are being registered.
//! A lookup that finds nothing is not an error; see [`MatchResult::NoMatch`].
//!
//! [`MatchResult::NoMatch`]: crate::routing::MatchResult::NoMatch

use axum::http::Method;
use thiserror::Error;

/// Why a path pattern was rejected by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("catch-all *{0} must be the last segment")]
    WildcardNotLast(String),

    #[error("parameter name is empty")]
    EmptyParamName,

    #[error("parameter {0:?} appears more than once")]
    DuplicateParam(String),
}

/// Error returned by route registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The pattern could not be compiled.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern {
        pattern: String,
        #[source]
        reason: PatternError,
    },

    /// The same method is already bound to the same resolved path.
    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: Method, path: String },

    /// Two patterns disagree on the parameter name at one trie position,
    /// e.g. `/users/:id` and `/users/:user_id/posts`.
    #[error("route {path} captures {attempted} where {existing} is already registered")]
    ParamConflict {
        path: String,
        existing: String,
        attempted: String,
    },

    /// A configured method name is not a valid HTTP method token.
    #[error("{0:?} is not an HTTP method")]
    InvalidMethod(String),

    /// A configured status is not a valid HTTP status code.
    #[error("{0} is not a valid HTTP status code")]
    InvalidStatus(u16),

    /// The router was already built into a route table.
    #[error("router is sealed, routes cannot be added after build()")]
    Sealed,
}

impl RouteError {
    pub(crate) fn invalid(pattern: &str, reason: PatternError) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
    }
}
