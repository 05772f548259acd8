//! Router middleware driven through axum without a listener.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware;
use tower::ServiceExt;

use path_router::config::ServerConfig;
use path_router::http::{handler_fn, param, route_requests, RouteHandler, RouteParams, RouterLayer};
use path_router::routing::Router;
use path_router::HttpServer;

mod common;

use common::{body_string, request, route};

/// An app whose fallback counts how often it was reached.
fn app_with_counter(layer: RouterLayer) -> (axum::Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = axum::Router::new()
        .fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, "not found")
            }
        })
        .layer(layer);
    (app, hits)
}

#[tokio::test]
async fn test_function_middleware_matches_and_falls_through() {
    let router = Router::new();
    router.get("/foo", handler_fn(|| async { "bar" })).unwrap();
    let table = Arc::new(router.build());

    let app = axum::Router::new()
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") })
        .layer(middleware::from_fn_with_state(table, route_requests));

    let response = app.clone().oneshot(request(Method::GET, "/foo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "bar");

    let response = app.clone().oneshot(request(Method::GET, "/bar")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "not found");

    let response = app.oneshot(request(Method::POST, "/foo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_layer_skips_next_stage_on_match() {
    let router = Router::new();
    router.get("/foo", handler_fn(|| async { "bar" })).unwrap();
    let (app, hits) = app_with_counter(router.into_layer());

    let response = app.clone().oneshot(request(Method::GET, "/foo")).await.unwrap();
    assert_eq!(body_string(response).await, "bar");
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let response = app.oneshot(request(Method::GET, "/foo/extra")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_params_reach_handlers() {
    let router: Router<RouteHandler> = Router::new();
    router
        .get(
            "/users/:id",
            handler_fn(|RouteParams(params): RouteParams| async move {
                format!("user {}", params.by_name("id"))
            }),
        )
        .unwrap();
    router
        .get(
            "/users/:id/posts/:post",
            handler_fn(|request: Request| async move {
                format!(
                    "{}/{}/{:?}",
                    param(request.extensions(), "id"),
                    param(request.extensions(), "post"),
                    param(request.extensions(), "missing"),
                )
            }),
        )
        .unwrap();
    let (app, _) = app_with_counter(router.into_layer());

    let response = app.clone().oneshot(request(Method::GET, "/users/42")).await.unwrap();
    assert_eq!(body_string(response).await, "user 42");

    let response = app
        .oneshot(request(Method::GET, "/users/7/posts/hello"))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "7/hello/\"\"");
}

#[tokio::test]
async fn test_params_are_percent_decoded() {
    let router = Router::new();
    router
        .get(
            "/users/:name",
            handler_fn(|request: Request| async move {
                param(request.extensions(), "name").to_string()
            }),
        )
        .unwrap();
    router.get("/café", handler_fn(|| async { "coffee" })).unwrap();
    let (app, hits) = app_with_counter(router.into_layer());

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/users/john%20doe"))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "john doe");

    let response = app.oneshot(request(Method::GET, "/caf%C3%A9")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "coffee");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_wildcard_capture() {
    let router = Router::new();
    router
        .get(
            "/static/*path",
            handler_fn(|RouteParams(params): RouteParams| async move {
                format!("[{}]", params.by_name("path"))
            }),
        )
        .unwrap();
    let (app, _) = app_with_counter(router.into_layer());

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/static/css/app.css"))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "[css/app.css]");

    let response = app.oneshot(request(Method::GET, "/static")).await.unwrap();
    assert_eq!(body_string(response).await, "[]");
}

#[tokio::test]
async fn test_groups_dispatch() {
    let router = Router::new();
    let api = router.group("/api");
    let v1 = api.group("v1");
    v1.get("/status", handler_fn(|| async { "v1 ok" })).unwrap();
    api.post("/items", handler_fn(|| async { (StatusCode::CREATED, "created") }))
        .unwrap();
    let (app, hits) = app_with_counter(router.into_layer());

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/v1/status"))
        .await
        .unwrap();
    assert_eq!(body_string(response).await, "v1 ok");

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/api/items"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(request(Method::GET, "/api/items")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_requests_keep_their_own_params() {
    let router = Router::new();
    router
        .get(
            "/echo/:value",
            handler_fn(|RouteParams(params): RouteParams| async move {
                tokio::task::yield_now().await;
                params.by_name("value").to_string()
            }),
        )
        .unwrap();
    let (app, _) = app_with_counter(router.into_layer());

    let mut tasks = Vec::new();
    for i in 0..64 {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let uri = format!("/echo/{}", i);
            let response = app.oneshot(request(Method::GET, &uri)).await.unwrap();
            (i, body_string(response).await)
        }));
    }

    for task in tasks {
        let (i, body) = task.await.unwrap();
        assert_eq!(body, i.to_string());
    }
}

#[tokio::test]
async fn test_configured_routes() {
    let mut config = ServerConfig::default();
    config.router.base_path = "/api".into();
    config.routes.push(route("hello", "GET", "/hello/:name", 200, "Hello, {name}!"));
    config.routes.push(route("create", "POST", "/items", 201, "made"));

    let server = HttpServer::new(config).unwrap();
    let app = server.app();

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/api/hello/ann"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Hello, ann!");

    let response = app
        .clone()
        .oneshot(request(Method::POST, "/api/items"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_string(response).await, "made");

    let response = app.oneshot(request(Method::GET, "/hello/ann")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
