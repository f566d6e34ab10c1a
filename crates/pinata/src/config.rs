//! Configuration for the Pinata client
//!
//! Transport settings with the service's defaults, overridable per client.

use crate::error::{PinataError, PinataResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default Pinata API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pinata.cloud";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Idle connections kept per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// How long an idle pooled connection is kept
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
    /// Idle timeout for pooled connections
    #[serde(with = "duration_secs")]
    pub pool_idle_timeout: Duration,
    /// `User-Agent` sent with every request
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            user_agent: format!("pinata-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `PINATA_API_URL`: Base URL (defaults to the public endpoint)
    /// - `PINATA_TIMEOUT_SECS`: Request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`PinataError::Config`] if `PINATA_TIMEOUT_SECS` is not a whole
    /// number of seconds or the result fails [`Self::validate`].
    pub fn from_env() -> PinataResult<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("PINATA_API_URL") {
            config.base_url = url;
        }

        if let Ok(secs) = env::var("PINATA_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| PinataError::config(format!("invalid PINATA_TIMEOUT_SECS: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set connection pool limits
    #[must_use]
    pub fn with_pool(mut self, max_idle_per_host: usize, idle_timeout: Duration) -> Self {
        self.pool_max_idle_per_host = max_idle_per_host;
        self.pool_idle_timeout = idle_timeout;
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`PinataError::Config`] for an empty or non-HTTP base URL and
    /// for a zero timeout.
    pub fn validate(&self) -> PinataResult<()> {
        if self.base_url.is_empty() {
            return Err(PinataError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PinataError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(PinataError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.pinata.cloud");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.pool_max_idle_per_host, 100);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
        assert!(config.user_agent.starts_with("pinata-sdk/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_secs(90))
            .with_pool(10, Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default()
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let json = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(json["timeout"], 30);
        assert_eq!(json["pool_idle_timeout"], 90);

        let config: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
