//! Configuration management for the MCP server.
//!
//! The only required setting is the Intigriti API token. Everything else
//! (server name, log level, transport) has a default and can be overridden
//! with `MCP_`-prefixed environment variables. The API base URL and request
//! timeout are compiled in.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use super::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TOKEN_ENV_VAR};
use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Intigriti API access.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Intigriti Researcher API settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,

    /// Bearer token sent with every request.
    #[serde(skip_serializing, default)]
    pub token: String,

    /// Timeout for a single API call.
    pub timeout: Duration,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// API settings for the given token, with the compiled-in URL and timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the token from `INTIGRITI_API_TOKEN`.
    ///
    /// A missing or blank token is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "{} is required and must not be empty",
                    TOKEN_ENV_VAR
                ))
            })?;

        Ok(Self::new(token))
    }
}

impl Config {
    /// Default configuration around the given API settings.
    pub fn new(api: ApiConfig) -> Self {
        Self {
            server: ServerConfig {
                name: "intigriti-researcher".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api,
        }
    }

    /// Load configuration from environment variables (and `.env`, if any).
    ///
    /// Fails when `INTIGRITI_API_TOKEN` is unset or blank; the server must
    /// not start without it.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::new(ApiConfig::from_env()?);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        info!("Intigriti API token loaded from environment");

        Ok(config)
    }
}

// Env var tests across modules run serially
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
