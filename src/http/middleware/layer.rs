//! Tower layer form of the routing middleware.
//!
//! The wrapped service is the "next" stage: it only sees requests no route
//! matched.

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::handler::RouteHandler;
use crate::http::middleware::routing::{dispatch, Dispatch};
use crate::routing::{RouteTable, Router};

/// Layer that routes requests through a frozen route table.
#[derive(Clone)]
pub struct RouterLayer {
    table: Arc<RouteTable<RouteHandler>>,
}

impl RouterLayer {
    pub fn new(table: RouteTable<RouteHandler>) -> Self {
        Self::from_shared(Arc::new(table))
    }

    pub fn from_shared(table: Arc<RouteTable<RouteHandler>>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<RouteTable<RouteHandler>> {
        &self.table
    }
}

impl<S> Layer<S> for RouterLayer {
    type Service = RouterService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RouterService {
            table: Arc::clone(&self.table),
            inner,
        }
    }
}

impl Router<RouteHandler> {
    /// Build the route table and wrap it in a [`RouterLayer`].
    pub fn into_layer(self) -> RouterLayer {
        RouterLayer::new(self.build())
    }
}

/// Service produced by [`RouterLayer`].
///
/// Like [`route_requests`](crate::http::route_requests), a match never
/// reaches the inner service.
#[derive(Clone)]
pub struct RouterService<S> {
    table: Arc<RouteTable<RouteHandler>>,
    inner: S,
}

impl<S> Service<Request> for RouterService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        match dispatch(&self.table, request) {
            Dispatch::Handled(response) => Box::pin(async move { Ok(response.await) }),
            Dispatch::Fallthrough(request) => {
                // Take the service that was driven to readiness, leave a clone behind.
                let clone = self.inner.clone();
                let mut inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(inner.call(request))
            }
        }
    }
}
