//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;
use strum::{Display, EnumString};
use url::Url;

use crate::error::{Result, ServiceError};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(try_from = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl TryFrom<String> for LogFormat {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.trim().parse()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    ///
    /// Must be an IP literal; host names such as `localhost` are not resolved.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === CORS ===
    /// Origins allowed to read responses, comma-separated in the environment.
    #[serde(default = "default_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Frontend dev server.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: default_allowed_origins(),
            rust_log: default_log_level(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ServiceError::InvalidConfig(
                "PORT must be greater than 0".to_string(),
            ));
        }

        self.socket_addr()?;
        self.allowed_origins().map(|_| ())
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            ServiceError::InvalidConfig(format!("HOST {:?} is not an IP address: {}", self.host, e))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Configured origins in the serialized form browsers send in `Origin`.
    pub fn allowed_origins(&self) -> Result<Vec<String>> {
        let origins: Vec<&str> = self
            .cors_allowed_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() {
            return Err(ServiceError::InvalidConfig(
                "CORS_ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        origins.into_iter().map(normalize_origin).collect()
    }
}

/// Reduce a configured origin to `scheme://host[:port]`.
///
/// Wildcards are refused because credentials are always allowed.
fn normalize_origin(raw: &str) -> Result<String> {
    let invalid = |reason: &str| ServiceError::InvalidOrigin {
        origin: raw.to_string(),
        reason: reason.to_string(),
    };

    if raw == "*" {
        return Err(invalid("wildcard origin cannot be combined with credentials"));
    }

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("user info is not allowed"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("an origin has no path, query or fragment"));
    }

    Ok(url.origin().ascii_serialization())
}
