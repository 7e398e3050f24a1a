//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TIENDA_DATABASE_URL` - `PostgreSQL` connection string
//! - `TIENDA_BASE_URL` - Public URL for the storefront
//! - `PAYPAL_CLIENT_ID` - PayPal REST API client ID
//! - `PAYPAL_CLIENT_SECRET` - PayPal REST API client secret
//!
//! ## Optional
//! - `TIENDA_HOST` - Bind address (default: 127.0.0.1)
//! - `TIENDA_PORT` - Listen port (default: 3000)
//! - `PAYPAL_ENVIRONMENT` - `sandbox` or `live` (default: sandbox)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct TiendaConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// PayPal REST API configuration
    pub paypal: PaypalConfig,
}

/// PayPal REST API configuration.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct PaypalConfig {
    /// Which PayPal environment to talk to.
    pub environment: PaypalEnvironment,
    /// REST API client ID (safe to expose in browser checkout flows)
    pub client_id: String,
    /// REST API client secret (server-side only)
    pub client_secret: SecretString,
}

impl std::fmt::Debug for PaypalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaypalConfig")
            .field("environment", &self.environment)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// PayPal environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaypalEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl PaypalEnvironment {
    /// Base URL of the REST API for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-m.sandbox.paypal.com",
            Self::Live => "https://api-m.paypal.com",
        }
    }
}

impl FromStr for PaypalEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            other => Err(format!("expected 'sandbox' or 'live', got '{other}'")),
        }
    }
}

impl TiendaConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TIENDA_DATABASE_URL")?;
        let host = get_env_or_default("TIENDA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIENDA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TIENDA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIENDA_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("TIENDA_BASE_URL")?;

        let paypal = PaypalConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            paypal,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PaypalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let environment = get_env_or_default("PAYPAL_ENVIRONMENT", "sandbox")
            .parse::<PaypalEnvironment>()
            .map_err(|e| ConfigError::InvalidEnvVar("PAYPAL_ENVIRONMENT".to_string(), e))?;

        Ok(Self {
            environment,
            client_id: get_required_env("PAYPAL_CLIENT_ID")?,
            client_secret: get_required_secret("PAYPAL_CLIENT_SECRET")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_paypal_environment_parsing() {
        assert_eq!(
            "sandbox".parse::<PaypalEnvironment>().unwrap(),
            PaypalEnvironment::Sandbox
        );
        assert_eq!(
            "LIVE".parse::<PaypalEnvironment>().unwrap(),
            PaypalEnvironment::Live
        );
        assert!("production".parse::<PaypalEnvironment>().is_err());
    }

    #[test]
    fn test_paypal_environment_base_urls() {
        assert!(
            PaypalEnvironment::Sandbox
                .base_url()
                .contains("sandbox.paypal.com")
        );
        assert!(!PaypalEnvironment::Live.base_url().contains("sandbox"));
    }

    #[test]
    fn test_socket_addr() {
        let config = TiendaConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            paypal: PaypalConfig {
                environment: PaypalEnvironment::Sandbox,
                client_id: "client_id".to_string(),
                client_secret: SecretString::from("client_secret"),
            },
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_paypal_config_debug_redacts_secret() {
        let config = PaypalConfig {
            environment: PaypalEnvironment::Sandbox,
            client_id: "client_id_value".to_string(),
            client_secret: SecretString::from("super_secret_value"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("client_id_value"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }
}
