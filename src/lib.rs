//! Trie-based HTTP path router.
//!
//! Routes are registered per method against path patterns with named
//! (`:id`) and catch-all (`*rest`) segments, optionally under nested
//! groups that share one registry. [`Router::build`] freezes them into a
//! [`RouteTable`] that is consulted by a tower layer or an axum
//! middleware function. Unmatched requests pass through to the next stage.
//!
//! ```
//! use axum::http::Method;
//! use path_router::routing::Router;
//!
//! let router = Router::new();
//! router.get("/users/:id", "user").unwrap();
//! router.get("/static/*path", "files").unwrap();
//!
//! let table = router.build();
//! let found = table.lookup(&Method::GET, "/static/css/app.css").into_option().unwrap();
//! assert_eq!(*found.handler, "files");
//! assert_eq!(found.params.by_name("path"), "css/app.css");
//! ```

// Core
pub mod routing;
pub mod http;

// Ambient
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::{handler_fn, param, HttpServer, RouteHandler, RouteParams, RouterLayer};
pub use lifecycle::Shutdown;
pub use routing::{Params, RouteError, RouteTable, Router};
