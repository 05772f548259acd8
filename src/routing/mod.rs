//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     Router::handle(method, "/users/:id", handler)
//!     → pattern.rs (join base path, compile segments)
//!     → trie.rs (insert, detect duplicates and parameter conflicts)
//!     → Router::build() freezes the trie as an immutable RouteTable
//!
//! Incoming Request (method, path):
//!     → table.rs (split path, lookup)
//!     → trie.rs (literal → named → catch-all, backtracking)
//!     → Return: Matched { handler, params } or NoMatch
//! ```
//!
//! # Design Decisions
//! - Generic over the handler type; the HTTP adapter lives in [`crate::http`]
//! - Routes compiled at startup, immutable at runtime
//! - No regex, patterns are plain segment sequences
//! - Deterministic: insertion order never changes which route matches

pub mod error;
pub mod params;
pub mod pattern;
pub mod router;
pub mod table;

mod trie;

pub use error::{PatternError, RouteError};
pub use params::Params;
pub use pattern::{compile, join_paths, Pattern, Segment};
pub use router::Router;
pub use table::{MatchResult, RouteInfo, RouteMatch, RouteTable};
