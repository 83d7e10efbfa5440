//! Configuration for the HBnB API client
//!
//! Supports environment-based configuration with sensible defaults. The
//! configuration is fixed at client construction; nothing here is mutated
//! after a client exists.

use crate::error::{ApiError, ApiResult};
use crate::redirect::RedirectPolicy;
use hbnb_core::i18n::Lang;
use hbnb_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production API root
const DEFAULT_API_URL: &str = "https://app.hbnb.sa/api/v1";

/// Default development API root (local Flask server)
const DEV_API_URL: &str = "http://127.0.0.1:5000/api/v1";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development against a local backend
    Development,
    /// Production environment
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Parse from the `HBNB_ENV` environment variable
    pub fn from_env() -> Self {
        match env::var("HBNB_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the REST API (paths are joined onto this)
    pub base_url: String,
    /// Per-attempt request timeout
    #[serde(with = "millis_serde")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Language for localized terminal messages
    pub lang: Lang,
    /// Redirect decision on session expiry
    pub redirect: RedirectPolicy,
    /// Current environment
    pub environment: Environment,
}

mod millis_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(15_000),
            retry: RetryConfig::default(),
            lang: Lang::default(),
            redirect: RedirectPolicy::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `HBNB_API_URL`: API root (default depends on `HBNB_ENV`)
    /// - `HBNB_ENV`: Environment (development/production)
    /// - `HBNB_TIMEOUT_MS`: Per-attempt timeout in milliseconds
    /// - `HBNB_LANG`: Message language (`ar`/`en`)
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url = env::var("HBNB_API_URL").unwrap_or_else(|_| {
            match environment {
                Environment::Development => DEV_API_URL,
                Environment::Production => DEFAULT_API_URL,
            }
            .to_string()
        });

        let timeout = env::var("HBNB_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(15_000));

        let lang = env::var("HBNB_LANG")
            .map(|s| Lang::parse(&s))
            .unwrap_or_default();

        let config = Self {
            base_url,
            timeout,
            retry: RetryConfig::default(),
            lang,
            redirect: RedirectPolicy::default(),
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEV_API_URL.to_string(),
            timeout: Duration::from_millis(10_000),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Create production configuration
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Builder-style method to set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the per-attempt timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder-style method to set the message language
    #[must_use]
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Builder-style method to set the redirect policy
    #[must_use]
    pub fn with_redirect(mut self, redirect: RedirectPolicy) -> Self {
        self.redirect = redirect;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config(
                "base_url must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
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
        assert!(config.base_url.contains("hbnb.sa"));
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.lang, Lang::Ar);
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("127.0.0.1"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://staging.hbnb.sa/api/v1")
            .with_timeout(Duration::from_secs(60))
            .with_lang(Lang::En);

        assert_eq!(config.base_url, "https://staging.hbnb.sa/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.lang, Lang::En);
    }

    #[test]
    fn test_validation() {
        let valid = ClientConfig::default();
        assert!(valid.validate().is_ok());

        let empty = ClientConfig::default().with_base_url("");
        assert!(empty.validate().is_err());

        let scheme = ClientConfig::default().with_base_url("ftp://hbnb.sa");
        assert!(scheme.validate().is_err());

        let zero = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(zero.validate().is_err());
    }
}
