//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 8001)
//! - `STOREFRONT_BASE_URL` - Public URL, decides the cookie `Secure` flag
//!   (default: `http://localhost:8001`)
//! - `STOREFRONT_STATIC_DIR` - Public asset directory (default: `assets`)
//! - `STOREFRONT_CATALOG_PATH` - JSON product catalog; built-in list when unset
//! - `STOREFRONT_HASH_MEMORY_KIB` - Argon2 memory cost (default: 19456)
//! - `STOREFRONT_HASH_ITERATIONS` - Argon2 time cost (default: 2)
//! - `STOREFRONT_HASH_PARALLELISM` - Argon2 lanes (default: 1)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
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
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory served as the site's public asset tree
    pub static_dir: PathBuf,
    /// Optional catalog file replacing the built-in product list
    pub catalog_path: Option<PathBuf>,
    /// Password hashing work factor
    pub password_hashing: PasswordHashingConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Argon2id cost parameters.
///
/// The defaults follow the OWASP minimum recommendation for Argon2id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = PasswordHashingConfig::default();

        Ok(Self {
            database_url: get_database_url("STOREFRONT_DATABASE_URL")?,
            host: get_parsed_or_default("STOREFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: get_parsed_or_default("STOREFRONT_PORT", 8001)?,
            base_url: get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:8001"),
            static_dir: PathBuf::from(get_env_or_default("STOREFRONT_STATIC_DIR", "assets")),
            catalog_path: get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            password_hashing: PasswordHashingConfig {
                memory_kib: get_parsed_or_default("STOREFRONT_HASH_MEMORY_KIB", defaults.memory_kib)?,
                iterations: get_parsed_or_default("STOREFRONT_HASH_ITERATIONS", defaults.iterations)?,
                parallelism: get_parsed_or_default(
                    "STOREFRONT_HASH_PARALLELISM",
                    defaults.parallelism,
                )?,
            },
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
///
/// An empty primary value falls through to the fallback, like any unset
/// optional variable.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    first_non_empty([
        std::env::var(primary_key).ok(),
        std::env::var("DATABASE_URL").ok(),
    ])
    .map(SecretString::from)
    .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    first_non_empty([std::env::var(key).ok()])
}

/// The first value that is present and not blank.
fn first_non_empty(values: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, using `default` when it is unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
