//! Identity subsystem configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults produce the deterministic development setup.
//!
//! - `IDENTITY_SESSION_TTL_SECS` - Session lifetime in seconds (default: 3600)
//! - `IDENTITY_SEED_ADMIN_EMAIL` - Seed admin login (default: admin@example.com)
//! - `IDENTITY_SEED_ADMIN_SECRET` - Seed admin secret (default: admin123)
//! - `IDENTITY_SEED_RETAILER_EMAIL` - Seed retailer login (default: retailer@example.com)
//! - `IDENTITY_SEED_RETAILER_SECRET` - Seed retailer secret (default: retailer123)
//! - `IDENTITY_SEED_RETAILER_NAME` - Seed retailer business name

use secrecy::SecretString;
use thiserror::Error;

use stockist_core::Email;

use crate::seed;

/// Default session lifetime in seconds.
const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Identity subsystem configuration.
///
/// Seed secrets are intentionally well-known mock values (this subsystem
/// stores secrets verbatim); they still ride in `SecretString` so they never
/// leak through `Debug` or logs.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Session lifetime in seconds (fixed TTL; expiry is a passive check).
    pub session_ttl_secs: i64,
    /// Seed admin login identifier.
    pub seed_admin_email: Email,
    /// Seed admin secret.
    pub seed_admin_secret: SecretString,
    /// Seed retailer login identifier.
    pub seed_retailer_email: Email,
    /// Seed retailer secret.
    pub seed_retailer_secret: SecretString,
    /// Seed retailer business name.
    pub seed_retailer_name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            seed_admin_email: Email::parse(seed::ADMIN_EMAIL)
                .unwrap_or_else(|_| unreachable!("seed admin email is valid")),
            seed_admin_secret: SecretString::from(seed::ADMIN_SECRET.to_owned()),
            seed_retailer_email: Email::parse(seed::RETAILER_EMAIL)
                .unwrap_or_else(|_| unreachable!("seed retailer email is valid")),
            seed_retailer_secret: SecretString::from(seed::RETAILER_SECRET.to_owned()),
            seed_retailer_name: seed::RETAILER_NAME.to_owned(),
        }
    }
}

impl IdentityConfig {
    /// Load configuration from environment variables, falling back to the
    /// deterministic defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a set variable fails to parse
    /// (non-numeric TTL, malformed seed email).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = optional_env("IDENTITY_SESSION_TTL_SECS") {
            config.session_ttl_secs = raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "IDENTITY_SESSION_TTL_SECS".to_owned(),
                    format!("expected an integer number of seconds, got {raw:?}"),
                )
            })?;
        }

        if let Some(raw) = optional_env("IDENTITY_SEED_ADMIN_EMAIL") {
            config.seed_admin_email = parse_email("IDENTITY_SEED_ADMIN_EMAIL", &raw)?;
        }
        if let Some(raw) = optional_env("IDENTITY_SEED_ADMIN_SECRET") {
            config.seed_admin_secret = SecretString::from(raw);
        }
        if let Some(raw) = optional_env("IDENTITY_SEED_RETAILER_EMAIL") {
            config.seed_retailer_email = parse_email("IDENTITY_SEED_RETAILER_EMAIL", &raw)?;
        }
        if let Some(raw) = optional_env("IDENTITY_SEED_RETAILER_SECRET") {
            config.seed_retailer_secret = SecretString::from(raw);
        }
        if let Some(raw) = optional_env("IDENTITY_SEED_RETAILER_NAME") {
            config.seed_retailer_name = raw;
        }

        Ok(config)
    }

    /// Session lifetime as a [`chrono::Duration`].
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs)
    }
}

/// Read an environment variable, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_email(name: &str, raw: &str) -> Result<Email, ConfigError> {
    Email::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IdentityConfig::default();
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.seed_admin_email.as_str(), "admin@example.com");
        assert_eq!(config.seed_retailer_email.as_str(), "retailer@example.com");
    }

    #[test]
    fn test_session_ttl_duration() {
        let config = IdentityConfig::default();
        assert_eq!(config.session_ttl(), chrono::Duration::seconds(3600));
    }
}
