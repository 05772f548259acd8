//! Route registration.
//!
//! # Responsibilities
//! - Compile patterns and insert them into the shared trie
//! - Compose group prefixes
//! - Freeze the trie into a [`RouteTable`] once registration is done
//!
//! # Design Decisions
//! - A group is another `Router` view over the same registry, never a copy
//! - Registration goes through a mutex; it only runs during startup
//! - `build()` seals the registry so late registrations fail loudly

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::Method;

use crate::routing::error::RouteError;
use crate::routing::pattern::{compile, join_paths};
use crate::routing::table::{RouteInfo, RouteTable};
use crate::routing::trie::Node;

struct Registry<T> {
    root: Node<T>,
    routes: Vec<RouteInfo>,
    sealed: bool,
}

/// Registers handlers of type `T` under method + path patterns.
///
/// Cloning a router, or calling [`Router::group`], yields another view over
/// the same trie.
///
/// ```
/// use axum::http::Method;
/// use path_router::routing::Router;
///
/// let router = Router::new();
/// router.get("/", "index").unwrap();
///
/// let api = router.group("/api/v1");
/// api.get("/users/:id", "get_user").unwrap();
///
/// let table = router.build();
/// let m = table.lookup(&Method::GET, "/api/v1/users/7").into_option().unwrap();
/// assert_eq!(*m.handler, "get_user");
/// assert_eq!(m.params.get("id"), Some("7"));
/// ```
pub struct Router<T> {
    registry: Arc<Mutex<Registry<T>>>,
    base_path: String,
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_base_path("")
    }

    /// Create a router whose registrations are all prefixed with `base_path`.
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                root: Node::default(),
                routes: Vec::new(),
                sealed: false,
            })),
            base_path: join_paths(base_path, ""),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// A view sharing this router's trie with `prefix` appended to the base path.
    pub fn group(&self, prefix: &str) -> Router<T> {
        Router {
            registry: Arc::clone(&self.registry),
            base_path: join_paths(&self.base_path, prefix),
        }
    }

    /// Register a new request handler with the given path and method.
    pub fn handle(&self, method: Method, path: &str, handler: T) -> Result<(), RouteError> {
        let full_path = join_paths(&self.base_path, path);
        let pattern = compile(&full_path)?;
        let resolved = pattern.to_string();

        let mut registry = self.lock();
        if registry.sealed {
            return Err(RouteError::Sealed);
        }
        registry
            .root
            .insert(pattern.segments(), method.clone(), handler, &resolved)?;

        tracing::debug!(method = %method, path = %resolved, "Route registered");
        registry.routes.push(RouteInfo {
            method,
            path: resolved,
        });
        Ok(())
    }

    /// Shortcut for `handle(Method::GET, path, handler)`.
    pub fn get(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::GET, path, handler)
    }

    /// Shortcut for `handle(Method::HEAD, path, handler)`.
    pub fn head(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::HEAD, path, handler)
    }

    /// Shortcut for `handle(Method::OPTIONS, path, handler)`.
    pub fn options(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::OPTIONS, path, handler)
    }

    /// Shortcut for `handle(Method::POST, path, handler)`.
    pub fn post(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::POST, path, handler)
    }

    /// Shortcut for `handle(Method::PUT, path, handler)`.
    pub fn put(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::PUT, path, handler)
    }

    /// Shortcut for `handle(Method::PATCH, path, handler)`.
    pub fn patch(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::PATCH, path, handler)
    }

    /// Shortcut for `handle(Method::DELETE, path, handler)`.
    pub fn delete(&self, path: &str, handler: T) -> Result<(), RouteError> {
        self.handle(Method::DELETE, path, handler)
    }

    /// Take the trie out of the registry and freeze it.
    ///
    /// Every view sharing this registry is sealed afterwards; further
    /// registrations return [`RouteError::Sealed`]. Building twice yields
    /// an empty table the second time.
    pub fn build(&self) -> RouteTable<T> {
        let mut registry = self.lock();
        registry.sealed = true;
        let root = std::mem::take(&mut registry.root);
        let routes = std::mem::take(&mut registry.routes);

        tracing::debug!(routes = routes.len(), "Route table built");
        RouteTable::new(root, routes)
    }

    fn lock(&self) -> MutexGuard<'_, Registry<T>> {
        // Inserts only add nodes, so a poisoned registry is still consistent.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Router<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            base_path: self.base_path.clone(),
        }
    }
}

impl<T> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}
