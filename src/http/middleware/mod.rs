//! Request middleware.
//!
//! Two shapes over the same dispatch: an async function for
//! `axum::middleware::from_fn_with_state`, and a tower layer.

pub mod layer;
pub mod routing;

pub use layer::{RouterLayer, RouterService};
pub use routing::route_requests;
