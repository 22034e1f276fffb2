//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOWCASE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `ADMIN_USERNAME` - Admin username for HTTP Basic authentication
//! - `ADMIN_PASSWORD` - Admin password for HTTP Basic authentication
//!
//! ## Optional
//! - `SHOWCASE_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOWCASE_PORT` - Listen port (default: 8000)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins
//!   (default: `http://localhost:3000,http://localhost:5173`)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline in seconds (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling (default: 1.0)
//!
//! ## Optional (Cloudinary - enables image uploads)
//! - `CLOUDINARY_CLOUD_NAME` - Cloudinary cloud name
//! - `CLOUDINARY_API_KEY` - Cloudinary API key
//! - `CLOUDINARY_API_SECRET` - Cloudinary API secret

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "admin",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "your-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Static admin credentials checked on every write
    pub admin: AdminCredentials,
    /// Origins allowed by the CORS policy
    pub allowed_origins: Vec<String>,
    /// Uniform per-request deadline
    pub request_timeout: Duration,
    /// Cloudinary media host configuration (optional - uploads fail without it)
    pub cloudinary: Option<CloudinaryConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// The single admin account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Admin username
    pub username: String,
    /// Admin password
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    fn from_env() -> Result<Self, ConfigError> {
        let username = get_required_env("ADMIN_USERNAME")?;
        if username.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_USERNAME".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let password = get_required_env("ADMIN_PASSWORD")?;
        if password.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_PASSWORD".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if let Err(reason) = check_secret_strength(&password) {
            tracing::warn!("ADMIN_PASSWORD looks weak: {reason}");
        }

        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }
}

/// Cloudinary API configuration.
///
/// Implements `Debug` manually to redact the API secret.
#[derive(Clone)]
pub struct CloudinaryConfig {
    /// Cloud name (account identifier in API URLs)
    pub cloud_name: String,
    /// API key sent with every signed request
    pub api_key: String,
    /// API secret used to sign requests
    pub api_secret: SecretString,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl CloudinaryConfig {
    /// Load Cloudinary configuration from environment.
    ///
    /// Returns `None` if no Cloudinary variables are set (uploads disabled).
    /// All three variables must be set together.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let cloud_name = get_optional_env("CLOUDINARY_CLOUD_NAME");
        let api_key = get_optional_env("CLOUDINARY_API_KEY");
        let api_secret = get_optional_env("CLOUDINARY_API_SECRET");

        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(Self {
                cloud_name,
                api_key,
                api_secret: SecretString::from(api_secret),
            })),
            (None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "CLOUDINARY_*".to_string(),
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together"
                    .to_string(),
            )),
        }
    }
}

impl ApiConfig {
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

        let database_url = get_database_url("SHOWCASE_DATABASE_URL")?;
        let host = get_env_or_default("SHOWCASE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOWCASE_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOWCASE_PORT".to_string(), e.to_string()))?;
        let admin = AdminCredentials::from_env()?;
        let allowed_origins =
            parse_origins(&get_env_or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS));
        let request_timeout = get_optional_env("REQUEST_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?
            .map_or(
                Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                Duration::from_secs,
            );
        let cloudinary = CloudinaryConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            admin,
            allowed_origins,
            request_timeout,
            cloudinary,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the Cloudinary configuration, if available.
    ///
    /// Returns `None` if the Cloudinary variables were not set, which makes
    /// every upload fail with an upstream error.
    #[must_use]
    pub const fn cloudinary(&self) -> Option<&CloudinaryConfig> {
        self.cloudinary.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
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

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is not a placeholder and has reasonable entropy.
///
/// The admin password is operator-chosen, so a failure here is only logged.
fn check_secret_strength(secret: &str) -> Result<(), String> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(format!("appears to be a placeholder (contains '{pattern}')"));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(format!(
            "entropy too low ({entropy:.2} bits/char, want >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            admin: AdminCredentials {
                username: "owner".to_string(),
                password: SecretString::from("super_secret_admin_password"),
            },
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cloudinary: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_check_secret_strength_placeholder() {
        assert!(check_secret_strength("admin123").is_err());
        assert!(check_secret_strength("changeme-now").is_err());
    }

    #[test]
    fn test_check_secret_strength_low_entropy() {
        assert!(check_secret_strength("aaaaaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn test_check_secret_strength_valid() {
        assert!(check_secret_strength("aB3$xY9!mK2@nL5#pQ7&").is_ok());
    }

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        let origins = parse_origins(" https://a.test , ,https://b.test,");
        assert_eq!(origins, vec!["https://a.test", "https://b.test"]);
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let mut config = test_config();
        config.cloudinary = Some(CloudinaryConfig {
            cloud_name: "demo-cloud".to_string(),
            api_key: "1234567890".to_string(),
            api_secret: SecretString::from("super_secret_cloudinary_secret"),
        });

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("owner"));
        assert!(debug_output.contains("demo-cloud"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_admin_password"));
        assert!(!debug_output.contains("super_secret_cloudinary_secret"));
    }
}
