//! HSM Visualiser API.
//!
//! HTTP backend for the Habitat Suitability Model visualisation frontend.
//! It currently serves a greeting, a liveness probe, its own OpenAPI
//! document and Prometheus metrics, behind a credentialed CORS policy for
//! the frontend origin (`http://localhost:3000` unless configured otherwise).
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: HTTP routes, handlers, CORS and OpenAPI
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
