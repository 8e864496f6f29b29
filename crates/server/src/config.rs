//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COMPPARTS_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//! - `COMPPARTS_SESSION_SECRET` - Session-token signing secret (min 32
//!   chars, must not look like a placeholder)
//! - `STRIPE_SECRET_KEY` - Payment provider secret key
//!
//! ## Optional
//! - `COMPPARTS_HOST` - Bind address (default: 127.0.0.1)
//! - `COMPPARTS_PORT` - Listen port (default: 5000)
//! - `COMPPARTS_ALLOWED_ORIGINS` - Comma-separated CORS origins for
//!   credentialed browser clients (default: none)
//! - `STRIPE_API_BASE` - Payment provider base URL (default: <https://api.stripe.com>)
//! - `STRIPE_CURRENCY` - ISO 4217 currency code for payment intents (default: usd)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_SECRET_LENGTH: usize = 32;

/// Entropy floor for secrets, in bits per byte. Random keys land well
/// above this; words and repeated characters land well below.
const MIN_SECRET_ENTROPY: f64 = 3.3;

/// Fragments that betray a copy-pasted template value rather than a real
/// secret (matched case-insensitively).
const PLACEHOLDER_FRAGMENTS: &[&str] = &[
    "changeme", "replace", "example", "placeholder", "secret", "password", "your-", "put-your",
    "add-your", "enter-", "insert", "todo", "fixme", "xxx",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL (contains the password)
    pub database_url: SecretString,
    /// Bind address
    pub host: IpAddr,
    /// Listen port
    pub port: u16,
    /// Origins allowed to make credentialed cross-site requests
    pub allowed_origins: Vec<Url>,
    /// Session-token signing secret
    pub session_secret: SecretString,
    /// Payment provider configuration
    pub stripe: StripeConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Payment provider configuration.
///
/// Implements `Debug` manually to redact the secret key.
#[derive(Clone)]
pub struct StripeConfig {
    /// Base URL of the provider API
    pub api_base: String,
    /// Secret API key (server-side only)
    pub secret_key: SecretString,
    /// ISO 4217 currency code used for payment intents
    pub currency: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_base", &self.api_base)
            .field("secret_key", &"[REDACTED]")
            .field("currency", &self.currency)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first when one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or invalid,
    /// or if a secret fails the placeholder/entropy checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env("COMPPARTS_DATABASE_URL")?;
        let host = env_or("COMPPARTS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("COMPPARTS_HOST".to_string(), e.to_string()))?;
        let port = env_or("COMPPARTS_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("COMPPARTS_PORT".to_string(), e.to_string()))?;
        let allowed_origins = allowed_origins_from_env()?;

        let session_secret = secret_from_env("COMPPARTS_SESSION_SECRET")?;
        if session_secret.expose_secret().len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::InsecureSecret(
                "COMPPARTS_SESSION_SECRET".to_string(),
                format!("needs at least {MIN_SECRET_LENGTH} characters"),
            ));
        }

        let stripe = StripeConfig::from_env()?;

        Ok(Self {
            database_url,
            host,
            port,
            allowed_origins,
            session_secret,
            stripe,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: env_or("STRIPE_API_BASE", "https://api.stripe.com"),
            secret_key: secret_from_env("STRIPE_SECRET_KEY")?,
            currency: env_or("STRIPE_CURRENCY", "usd"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Database URL with fallback to the conventional `DATABASE_URL`.
fn database_url_from_env(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Parse the comma-separated CORS origin list.
fn allowed_origins_from_env() -> Result<Vec<Url>, ConfigError> {
    let Ok(raw) = std::env::var("COMPPARTS_ALLOWED_ORIGINS") else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            Url::parse(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("COMPPARTS_ALLOWED_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}

/// Read a secret variable and reject values that cannot be real secrets.
fn secret_from_env(key: &str) -> Result<SecretString, ConfigError> {
    let value =
        std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))?;
    check_secret_plausible(&value, key)?;
    Ok(SecretString::from(value))
}

/// Reject placeholder-looking and low-entropy secret values.
fn check_secret_plausible(value: &str, key: &str) -> Result<(), ConfigError> {
    let lower = value.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_FRAGMENTS.iter().find(|f| lower.contains(**f)) {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("looks like a placeholder ('{fragment}')"),
        ));
    }

    let entropy = byte_entropy(value.as_bytes());
    if entropy < MIN_SECRET_ENTROPY {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "entropy {entropy:.2} bits/byte is below {MIN_SECRET_ENTROPY}; generate a random value"
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy of a byte string, in bits per byte.
#[allow(clippy::cast_precision_loss)] // secret lengths are tiny
fn byte_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }

    let mut counts = [0u32; 256];
    for &b in bytes {
        counts[usize::from(b)] += 1;
    }

    let len = bytes.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = f64::from(c) / len;
            -(p * p.log2())
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_entropy_degenerate_inputs() {
        assert!(byte_entropy(b"") < f64::EPSILON);
        // A single repeated byte carries no information
        assert!(byte_entropy(b"zzzzzzzzzz") < f64::EPSILON);
    }

    #[test]
    fn test_byte_entropy_of_random_looking_key() {
        assert!(byte_entropy(b"wJ4$uj0qT!e9&gXm2#bZ6^dVr8@kHn1p") > MIN_SECRET_ENTROPY);
    }

    #[test]
    fn test_placeholder_value_rejected() {
        let err = check_secret_plausible("put-your-key-here-1234567890", "TEST_KEY").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_repeated_characters_rejected() {
        assert!(check_secret_plausible("qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq", "TEST_KEY").is_err());
    }

    #[test]
    fn test_plausible_secret_accepted() {
        assert!(check_secret_plausible("wJ4$uj0qT!e9&gXm2#bZ6^dVr8@kHn1p", "TEST_KEY").is_ok());
    }

    #[test]
    fn test_stripe_config_debug_redacts_secret() {
        let config = StripeConfig {
            api_base: "https://api.stripe.com".to_string(),
            secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
            currency: "usd".to_string(),
        };

        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk_test_"));
    }
}
