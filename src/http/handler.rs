//! Route handlers.
//!
//! The router stores type-erased handlers so routes with different extractor
//! signatures can live in one trie. Any axum handler can be converted with
//! [`handler_fn`].

use std::fmt;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::response::Response;
use futures_util::future::BoxFuture;

type BoxedHandler = dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync;

/// A cloneable, type-erased request handler.
#[derive(Clone)]
pub struct RouteHandler {
    inner: Arc<BoxedHandler>,
}

impl RouteHandler {
    /// Run the handler on a request.
    pub fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        (self.inner)(request)
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler").finish_non_exhaustive()
    }
}

/// Wrap an axum handler (async fn or closure with extractors).
///
/// ```
/// use path_router::http::{handler_fn, RouteParams};
/// use path_router::routing::Router;
///
/// async fn hello(RouteParams(params): RouteParams) -> String {
///     format!("Hello, {}!", params.by_name("user"))
/// }
///
/// let router = Router::new();
/// router.get("/hello/:user", handler_fn(hello)).unwrap();
/// ```
pub fn handler_fn<H, X>(handler: H) -> RouteHandler
where
    H: Handler<X, ()> + Sync,
{
    RouteHandler {
        inner: Arc::new(move |request: Request| -> BoxFuture<'static, Response> {
            Box::pin(handler.clone().call(request, ()))
        }),
    }
}
