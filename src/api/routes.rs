//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::cors::cors_layer;
use super::handlers::{health, metrics, root, AppState};
use super::openapi::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
use crate::config::Config;
use crate::error::Result;
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(middleware::from_fn(track_http))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the router with the CORS policy taken from `config`.
pub fn router_from_config(config: &Config, state: AppState) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origins()?)?;
    Ok(create_router(state, cors))
}
