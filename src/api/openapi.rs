//! OpenAPI document for the visualiser API.

use utoipa::OpenApi;

use super::handlers::{self, HealthResponse, RootResponse};

/// API title.
pub const API_TITLE: &str = "HSM Visualiser API";
/// API description.
pub const API_DESCRIPTION: &str = "API for Habitat Suitability Model Visualisation";
/// API version.
pub const API_VERSION: &str = "0.1.0";

/// Path of the generated document.
pub const OPENAPI_PATH: &str = "/openapi.json";
/// Path of the Swagger UI.
pub const DOCS_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = API_TITLE,
        version = API_VERSION,
        description = API_DESCRIPTION
    ),
    paths(handlers::root, handlers::health),
    components(schemas(RootResponse, HealthResponse)),
    tags((name = "meta", description = "Service greeting and liveness"))
)]
pub struct ApiDoc;
