//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GAME_API_URL` - Base URL of the game backend REST API (e.g. `https://api.agelessrepublic.gg/api`)
//! - `GOOGLE_CLIENT_ID` - OAuth client ID rendered into the login page
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL for the panel (default: `http://localhost:3001`)
//! - `GAME_API_TIMEOUT_SECS` - Per-request timeout for backend calls (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance sample rate (default: 0.0)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Game backend API configuration
    pub game_api: GameApiConfig,
    /// OAuth client ID for the login page
    pub google_client_id: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Game backend REST API configuration.
#[derive(Debug, Clone)]
pub struct GameApiConfig {
    /// Base URL, without trailing slash (e.g. `https://api.agelessrepublic.gg/api`)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"<pem>")
            .field("key_pem", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let game_api_url = require_env("GAME_API_URL")?;
        let google_client_id = require_env("GOOGLE_CLIENT_ID")?;

        let host: IpAddr = optional_env("ADMIN_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_owned(), format!("{e}")))?;

        let port = match optional_env("ADMIN_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_owned(), format!("{e}")))?,
            None => DEFAULT_PORT,
        };

        let base_url =
            optional_env("ADMIN_BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));

        let timeout_secs = match optional_env("GAME_API_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|e| {
                ConfigError::InvalidEnvVar("GAME_API_TIMEOUT_SECS".to_owned(), format!("{e}"))
            })?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };

        let tls = match (optional_env("ADMIN_TLS_CERT"), optional_env("ADMIN_TLS_KEY")) {
            (Some(cert_pem), Some(key_pem)) => Some(TlsConfig {
                cert_pem,
                key_pem: SecretString::from(key_pem),
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("ADMIN_TLS_KEY".to_owned()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("ADMIN_TLS_CERT".to_owned()));
            }
        };

        Ok(Self {
            host,
            port,
            base_url,
            game_api: GameApiConfig {
                base_url: game_api_url.trim_end_matches('/').to_owned(),
                timeout: Duration::from_secs(timeout_secs),
            },
            google_client_id,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
            tls,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS (drives the Secure cookie flag).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_owned()))
}

/// Read an environment variable, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_rate(name: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = optional_env(name) else {
        return Ok(default);
    };
    let rate: f32 = raw
        .parse()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), format!("{e}")))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "must be between 0.0 and 1.0".to_owned(),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig {
            host: "127.0.0.1".parse().expect("valid addr"),
            port: 3001,
            base_url: "http://localhost:3001".to_owned(),
            game_api: GameApiConfig {
                base_url: "http://localhost:5000/api".to_owned(),
                timeout: Duration::from_secs(10),
            },
            google_client_id: "client-id".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert!(!config.is_secure());
    }

    #[test]
    fn test_is_secure_from_base_url() {
        let mut config = AdminConfig {
            host: "0.0.0.0".parse().expect("valid addr"),
            port: 443,
            base_url: "https://admin.agelessrepublic.gg".to_owned(),
            game_api: GameApiConfig {
                base_url: "https://api.agelessrepublic.gg/api".to_owned(),
                timeout: Duration::from_secs(10),
            },
            google_client_id: "client-id".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
            tls: None,
        };
        assert!(config.is_secure());
        config.base_url = "http://localhost".to_owned();
        assert!(!config.is_secure());
    }
}
