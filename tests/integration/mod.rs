//! Integration tests for the HSM Visualiser API router.
//!
//! These drive the full router (tracing, CORS, metrics, docs) in-process.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use hsm_visualiser_api::api::{router_from_config, AppState};
use hsm_visualiser_api::config::Config;
use hsm_visualiser_api::metrics::detached_handle;

const FRONTEND: &str = "http://localhost:3000";

fn app() -> Router {
    router_from_config(&Config::default(), AppState::new(detached_handle()))
        .expect("default config builds a router")
}

async fn send(request: Request<Body>) -> Response {
    app().oneshot(request).await.unwrap()
}

async fn get(uri: &str) -> Response {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_returns_welcome_message_every_time() {
    for _ in 0..3 {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"message": "Welcome to HSM Visualiser API"})
        );
    }
}

#[tokio::test]
async fn health_reports_healthy() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(json_body(response).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn allowed_origin_receives_cors_headers() {
    let response = send(
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, FRONTEND)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn foreign_origin_is_served_without_cors_grant() {
    let response = send(
        Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let allow_origin = response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN);
    assert!(allow_origin.map_or(true, |v| v != "http://evil.example"));
    assert_eq!(json_body(response).await, json!({"status": "healthy"}));
}

#[tokio::test]
async fn preflight_from_allowed_origin_mirrors_method_and_headers() {
    let response = send(
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, FRONTEND)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header,authorization")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "PUT");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "x-custom-header,authorization"
    );
}

#[tokio::test]
async fn configured_origins_replace_the_default() {
    let config = Config {
        cors_allowed_origins: vec!["https://maps.example.org".to_string()],
        ..Config::default()
    };
    let app = router_from_config(&config, AppState::new(detached_handle())).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://maps.example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://maps.example.org"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, FRONTEND)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn unknown_paths_return_not_found() {
    for uri in ["/species", "/health/deep", "/api/v1/status"] {
        assert_eq!(get(uri).await.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn unsupported_method_returns_method_not_allowed() {
    let response = send(
        Request::builder()
            .method(Method::POST)
            .uri("/health")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn openapi_document_describes_the_service() {
    let response = get("/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await;
    assert_eq!(doc["info"]["title"], "HSM Visualiser API");
    assert_eq!(
        doc["info"]["description"],
        "API for Habitat Suitability Model Visualisation"
    );
    assert_eq!(doc["info"]["version"], "0.1.0");
    assert!(doc["paths"]["/"]["get"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
}

#[tokio::test]
async fn metrics_endpoint_serves_prometheus_text() {
    let response = get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

/// Lines of a Prometheus exposition for `metric` carrying every given label.
fn series<'a>(rendered: &'a str, metric: &str, labels: &[&str]) -> Vec<&'a str> {
    rendered
        .lines()
        .filter(|line| line.starts_with(metric))
        .filter(|line| labels.iter().all(|label| line.contains(label)))
        .collect()
}

#[tokio::test]
async fn requests_are_counted_per_route_and_status() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let app = router_from_config(&Config::default(), AppState::new(handle.clone())).unwrap();
    for uri in ["/health", "/nope", "/"] {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
    }

    let rendered = handle.render();
    assert_eq!(
        series(
            &rendered,
            "http_requests_total",
            &[r#"method="GET""#, r#"path="/health""#, r#"status="200""#]
        )
        .len(),
        1,
        "{rendered}"
    );
    assert_eq!(
        series(
            &rendered,
            "http_requests_total",
            &[r#"path="/""#, r#"status="200""#]
        )
        .len(),
        1,
        "{rendered}"
    );
    assert_eq!(
        series(
            &rendered,
            "http_requests_total",
            &[r#"path="unmatched""#, r#"status="404""#]
        )
        .len(),
        1,
        "{rendered}"
    );
    assert!(
        series(&rendered, "http_requests_total", &[r#"path="/nope""#]).is_empty(),
        "{rendered}"
    );
    assert!(
        !series(
            &rendered,
            "http_request_latency_ms",
            &[r#"method="GET""#, r#"path="/health""#]
        )
        .is_empty(),
        "{rendered}"
    );
}
