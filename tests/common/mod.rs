//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use path_router::config::RouteConfig;
use path_router::lifecycle::Shutdown;
use path_router::HttpServer;

/// A configured route answering with a fixed status and body template.
#[allow(dead_code)]
pub fn route(name: &str, method: &str, path: &str, status: u16, body: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        method: method.into(),
        path: path.into(),
        status,
        body: body.into(),
    }
}

/// Build an empty-bodied request.
#[allow(dead_code)]
pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body into a string.
#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve `server` on an ephemeral port until `shutdown` is triggered.
#[allow(dead_code)]
pub async fn spawn_server(
    server: HttpServer,
    shutdown: &Shutdown,
) -> (SocketAddr, JoinHandle<Result<(), std::io::Error>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));
    (addr, handle)
}
