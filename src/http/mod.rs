//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout and trace layers)
//!     → middleware (route table lookup)
//!         matched   → params into request extensions → handler.rs (bound handler)
//!         unmatched → next stage (fallback, 404)
//!     → params.rs (handlers read captured parameters)
//! ```

pub mod handler;
pub mod middleware;
pub mod params;
pub mod server;

pub use handler::{handler_fn, RouteHandler};
pub use middleware::{route_requests, RouterLayer, RouterService};
pub use params::{param, RouteParams};
pub use server::HttpServer;
