//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Register the configured routes with the path router
//! - Wire up middleware (routing, timeout, tracing)
//! - Answer unmatched requests with 404
//! - Bind server to listener and drain on shutdown

use std::time::Duration;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::Router as AxumRouter;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{RouteConfig, ServerConfig};
use crate::http::handler::{handler_fn, RouteHandler};
use crate::http::middleware::RouterLayer;
use crate::http::params::RouteParams;
use crate::routing::{Params, RouteError, Router};

/// HTTP server serving the configured routes.
pub struct HttpServer {
    app: AxumRouter,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server whose routes come from `config.routes`.
    pub fn new(config: ServerConfig) -> Result<Self, RouteError> {
        let router = Router::with_base_path(&config.router.base_path);

        for route in &config.routes {
            register_static(&router, route)?;
        }

        Ok(Self::from_router(config, router))
    }

    /// Create a server around routes registered in code.
    ///
    /// Routes listed in `config.routes` are not added.
    pub fn from_router(config: ServerConfig, router: Router<RouteHandler>) -> Self {
        let table = router.build();
        for route in table.routes() {
            tracing::info!(route = %route, "Serving route");
        }

        let app = Self::build_app(&config, RouterLayer::new(table));
        Self { app, config }
    }

    /// Build the Axum application with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, routes: RouterLayer) -> AxumRouter {
        AxumRouter::new()
            .fallback(not_found)
            .layer(routes)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The assembled application, for driving requests without a listener.
    pub fn app(&self) -> AxumRouter {
        self.app.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn register_static(router: &Router<RouteHandler>, route: &RouteConfig) -> Result<(), RouteError> {
    let method = Method::from_bytes(route.method.as_bytes())
        .map_err(|_| RouteError::InvalidMethod(route.method.clone()))?;
    let status = StatusCode::from_u16(route.status)
        .map_err(|_| RouteError::InvalidStatus(route.status))?;
    let body = route.body.clone();

    tracing::debug!(name = %route.name, method = %method, path = %route.path, "Registering configured route");

    router.handle(
        method,
        &route.path,
        handler_fn(move |RouteParams(params): RouteParams| {
            let body = render_body(&body, &params);
            async move { (status, body) }
        }),
    )
}

/// Substitute `{name}` with the captured parameter `name`.
///
/// Unknown names render as empty strings; an unclosed `{` is kept verbatim.
pub fn render_body(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(params.by_name(&after[..close]));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        let mut params = Params::new();
        for (name, value) in pairs {
            params.push(name, value.to_string());
        }
        params
    }

    #[test]
    fn test_render_body() {
        let p = params(&[("user", "ann"), ("id", "7")]);
        assert_eq!(render_body("Hello, {user}! #{id}", &p), "Hello, ann! #7");
        assert_eq!(render_body("{missing}.", &p), ".");
        assert_eq!(render_body("no placeholders", &p), "no placeholders");
        assert_eq!(render_body("open {user", &p), "open {user");
    }

    #[test]
    fn test_new_rejects_invalid_method_and_status() {
        let mut config = ServerConfig::default();
        config.routes.push(RouteConfig {
            name: "bad-status".into(),
            method: "GET".into(),
            path: "/status".into(),
            status: 1000,
            body: String::new(),
        });
        assert!(matches!(
            HttpServer::new(config),
            Err(RouteError::InvalidStatus(1000))
        ));

        let mut config = ServerConfig::default();
        config.routes.push(RouteConfig {
            name: "bad-method".into(),
            method: "G ET".into(),
            path: "/method".into(),
            status: 200,
            body: String::new(),
        });
        assert!(matches!(
            HttpServer::new(config),
            Err(RouteError::InvalidMethod(_))
        ));
    }

    #[test]
    fn test_new_rejects_conflicting_routes() {
        let mut config = ServerConfig::default();
        config.routes.push(RouteConfig {
            name: "a".into(),
            method: "GET".into(),
            path: "/users/:id".into(),
            status: 200,
            body: String::new(),
        });
        config.routes.push(RouteConfig {
            name: "b".into(),
            method: "GET".into(),
            path: "/users/:name/posts".into(),
            status: 200,
            body: String::new(),
        });

        assert!(matches!(
            HttpServer::new(config),
            Err(RouteError::ParamConflict { .. })
        ));
    }
}
