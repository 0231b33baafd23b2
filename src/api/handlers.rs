//! HTTP API handlers.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

/// Greeting returned by the root endpoint.
pub const WELCOME_MESSAGE: &str = "Welcome to HSM Visualiser API";

/// Status reported by the liveness probe.
pub const HEALTHY: &str = "healthy";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Renders the Prometheus exposition for `/metrics`.
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create new app state.
    pub fn new(metrics: PrometheusHandle) -> Self {
        Self { metrics }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

/// Root response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting text.
    #[schema(example = "Welcome to HSM Visualiser API")]
    pub message: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving.
    #[schema(example = "healthy")]
    pub status: &'static str,
}

/// Root handler - fixed greeting.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Service greeting", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: WELCOME_MESSAGE })
}

/// Health check handler - always returns 200.
///
/// Liveness only: no dependency is probed.
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses(
        (status = 200, description = "Process is serving", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: HEALTHY })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
