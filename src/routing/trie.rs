//! Segment trie.
//!
//! Each node represents one path segment. Literal children are keyed by
//! their text; a node has at most one named child and at most one catch-all
//! child. Handlers live at terminal nodes, keyed by HTTP method.
//!
//! Lookup is a depth-first search with backtracking. At every node the
//! literal child is tried first, then the named child, then the catch-all.
//! A branch only succeeds if it ends at a node holding a handler for the
//! requested method, otherwise the search resumes with the next candidate.

use std::collections::HashMap;

use axum::http::Method;

use crate::routing::error::RouteError;
use crate::routing::params::Params;
use crate::routing::pattern::Segment;

/// A parameter slot: the captured name and the subtree below it.
#[derive(Debug)]
struct ParamChild<T> {
    name: String,
    node: Node<T>,
}

impl<T> ParamChild<T> {
    fn new(name: &str) -> Box<Self> {
        Box::new(Self {
            name: name.to_string(),
            node: Node::default(),
        })
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    literals: HashMap<String, Node<T>>,
    named: Option<Box<ParamChild<T>>>,
    /// Always a leaf: the compiler keeps `*name` in last position.
    wildcard: Option<Box<ParamChild<T>>>,
    handlers: HashMap<Method, T>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            literals: HashMap::new(),
            named: None,
            wildcard: None,
            handlers: HashMap::new(),
        }
    }
}

impl<T> Node<T> {
    /// Insert `handler` under `segments`.
    ///
    /// `path` is only used for error reporting.
    pub(crate) fn insert(
        &mut self,
        segments: &[Segment],
        method: Method,
        handler: T,
        path: &str,
    ) -> Result<(), RouteError> {
        let mut current = self;

        for segment in segments {
            current = match segment {
                Segment::Literal(text) => current.literals.entry(text.clone()).or_default(),
                Segment::Named(name) => {
                    let child = current.named.get_or_insert_with(|| ParamChild::new(name));
                    check_param_slot(child, segment, path)?;
                    &mut child.node
                }
                Segment::Wildcard(name) => {
                    let child = current
                        .wildcard
                        .get_or_insert_with(|| ParamChild::new(name));
                    check_param_slot(child, segment, path)?;
                    &mut child.node
                }
            };
        }

        if current.handlers.contains_key(&method) {
            return Err(RouteError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }
        current.handlers.insert(method, handler);
        Ok(())
    }

    /// Find the handler for `method` under `segments`, recording captures
    /// into `params`.
    pub(crate) fn find<'a>(
        &'a self,
        segments: &[&str],
        method: &Method,
        params: &mut Params,
    ) -> Option<&'a T> {
        let Some((&segment, rest)) = segments.split_first() else {
            if let Some(handler) = self.handlers.get(method) {
                return Some(handler);
            }
            // A catch-all may also match an empty remainder.
            let wildcard = self.wildcard.as_ref()?;
            let handler = wildcard.node.handlers.get(method)?;
            params.push(&wildcard.name, String::new());
            return Some(handler);
        };

        if let Some(child) = self.literals.get(segment) {
            if let Some(handler) = child.find(rest, method, params) {
                return Some(handler);
            }
        }

        if let Some(named) = &self.named {
            let mark = params.len();
            params.push(&named.name, segment.to_string());
            if let Some(handler) = named.node.find(rest, method, params) {
                return Some(handler);
            }
            params.truncate(mark);
        }

        if let Some(wildcard) = &self.wildcard {
            if let Some(handler) = wildcard.node.handlers.get(method) {
                params.push(&wildcard.name, segments.join("/"));
                return Some(handler);
            }
        }

        None
    }

    /// Number of (method, path) bindings in this subtree.
    pub(crate) fn route_count(&self) -> usize {
        self.handlers.len()
            + self.literals.values().map(Node::route_count).sum::<usize>()
            + self.named.as_ref().map_or(0, |c| c.node.route_count())
            + self.wildcard.as_ref().map_or(0, |c| c.node.route_count())
    }
}

fn check_param_slot<T>(
    child: &ParamChild<T>,
    segment: &Segment,
    path: &str,
) -> Result<(), RouteError> {
    let (sigil, name) = match segment {
        Segment::Named(name) => (':', name),
        Segment::Wildcard(name) => ('*', name),
        Segment::Literal(_) => return Ok(()),
    };
    if child.name == *name {
        return Ok(());
    }
    Err(RouteError::ParamConflict {
        path: path.to_string(),
        existing: format!("{}{}", sigil, child.name),
        attempted: format!("{}{}", sigil, name),
    })
}
