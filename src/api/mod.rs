//! HTTP API module: greeting, health, docs and metrics endpoints.

pub mod cors;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use routes::{create_router, router_from_config};
