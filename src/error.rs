//! Unified error types for the visualiser API.

use thiserror::Error;

/// Unified error type for the visualiser API.
///
/// The request handlers themselves are infallible; every variant here is a
/// startup failure.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configured CORS origin is not a usable origin.
    #[error("invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin {
        /// The offending origin as configured.
        origin: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
