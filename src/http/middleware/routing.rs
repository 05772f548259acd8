//! Routing middleware.
//!
//! Matches the request against the route table. On a match the captured
//! parameters are attached to the request and the bound handler produces
//! the response; the next stage is not called. Otherwise the request is
//! handed to the next stage untouched.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::http::handler::RouteHandler;
use crate::observability::metrics;
use crate::routing::{MatchResult, RouteMatch, RouteTable};

/// Result of offering a request to the router.
pub(crate) enum Dispatch {
    /// A route matched; the future yields the handler's response.
    Handled(BoxFuture<'static, Response>),
    /// Nothing matched; the request goes to the next stage.
    Fallthrough(Request),
}

pub(crate) fn dispatch(table: &RouteTable<RouteHandler>, mut request: Request) -> Dispatch {
    let started = Instant::now();
    let lookup = table.lookup(request.method(), request.uri().path());
    metrics::record_lookup(started);

    match lookup {
        MatchResult::Matched(RouteMatch { handler, params }) => {
            tracing::trace!(
                method = %request.method(),
                path = %request.uri().path(),
                params = params.len(),
                "Route matched"
            );
            metrics::record_dispatch(metrics::Outcome::Matched);

            let handler = handler.clone();
            request.extensions_mut().insert(params);
            Dispatch::Handled(handler.call(request))
        }
        MatchResult::NoMatch => {
            tracing::trace!(
                method = %request.method(),
                path = %request.uri().path(),
                "No route matched, falling through"
            );
            metrics::record_dispatch(metrics::Outcome::Fallthrough);
            Dispatch::Fallthrough(request)
        }
    }
}

/// Middleware function for [`axum::middleware::from_fn_with_state`].
///
/// A matched handler always answers: its return value is the response and
/// `next` is not run. Only unmatched requests reach `next`.
///
/// ```
/// use std::sync::Arc;
/// use axum::middleware;
/// use path_router::http::{handler_fn, route_requests};
/// use path_router::routing::Router;
///
/// let router = Router::new();
/// router.get("/foo", handler_fn(|| async { "bar" })).unwrap();
/// let table = Arc::new(router.build());
///
/// let app: axum::Router = axum::Router::new()
///     .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "not found") })
///     .layer(middleware::from_fn_with_state(table, route_requests));
/// ```
pub async fn route_requests(
    State(table): State<Arc<RouteTable<RouteHandler>>>,
    request: Request,
    next: Next,
) -> Response {
    match dispatch(&table, request) {
        Dispatch::Handled(response) => response.await,
        Dispatch::Fallthrough(request) => next.run(request).await,
    }
}
