//! Path pattern compilation.
//!
//! # Syntax
//! ```text
//! /users/:id/files/*path
//!  ^^^^^  ^^^       ^^^^^
//!  literal named    catch-all (last segment only)
//! ```
//!
//! Paths are split on `/`. Leading, trailing and repeated slashes carry no
//! meaning, so `/a//b/` and `a/b` compile to the same segments. Literals are
//! compared case-sensitively.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::percent_decode_str;

use crate::routing::error::{PatternError, RouteError};

/// One slash-delimited component of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(String),
    /// `:name`, captures a single path segment.
    Named(String),
    /// `*name`, captures every remaining segment joined by `/`.
    Wildcard(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if let Some(name) = raw.strip_prefix(':') {
            Segment::Named(name.to_string())
        } else if let Some(name) = raw.strip_prefix('*') {
            Segment::Wildcard(name.to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }

    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Named(name) | Segment::Wildcard(name) => Some(name),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Named(name) => write!(f, ":{}", name),
            Segment::Wildcard(name) => write!(f, "*{}", name),
        }
    }
}

/// A validated route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all captured parameters, in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Compile a pattern string into segments.
///
/// `/` (or any string made only of slashes) compiles to the root route.
/// Only the empty string is rejected as empty.
pub fn compile(pattern: &str) -> Result<Pattern, RouteError> {
    if pattern.is_empty() {
        return Err(RouteError::invalid(pattern, PatternError::Empty));
    }

    let segments: Vec<Segment> = split_path(pattern).map(Segment::parse).collect();

    let mut seen: Vec<&str> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let Some(name) = segment.param_name() else {
            continue;
        };
        if name.is_empty() {
            return Err(RouteError::invalid(pattern, PatternError::EmptyParamName));
        }
        if seen.contains(&name) {
            return Err(RouteError::invalid(
                pattern,
                PatternError::DuplicateParam(name.to_string()),
            ));
        }
        seen.push(name);

        if matches!(segment, Segment::Wildcard(_)) && index + 1 != segments.len() {
            return Err(RouteError::invalid(
                pattern,
                PatternError::WildcardNotLast(name.to_string()),
            ));
        }
    }

    Ok(Pattern { segments })
}

/// Split a pattern or request path into its non-empty segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decode one request path segment.
///
/// Decoding happens after splitting, so `%2F` yields a `/` inside the
/// segment instead of a separator. A segment that does not decode to valid
/// UTF-8 is returned as received.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(segment))
}

/// Join a base path and a relative path.
///
/// Behaves like a filesystem join: the base loses its trailing slash,
/// duplicate slashes collapse and the result always starts with `/`.
/// Two empty inputs stay empty so the compiler can reject them.
pub fn join_paths(base: &str, relative: &str) -> String {
    if base.is_empty() && relative.is_empty() {
        return String::new();
    }

    let mut joined = String::with_capacity(base.len() + relative.len() + 1);
    for segment in split_path(base).chain(split_path(relative)) {
        joined.push('/');
        joined.push_str(segment);
    }
    if joined.is_empty() {
        joined.push('/');
    }
    joined
}
