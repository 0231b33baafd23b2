//! Cross-origin policy for the frontend.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::{Result, ServiceError};

/// Build the CORS layer for an exact list of origins.
///
/// Credentials are allowed, so "any method" and "any header" are expressed by
/// mirroring the preflight request rather than sending `*`.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.as_ref()).map_err(|e| ServiceError::InvalidOrigin {
                origin: origin.as_ref().to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
