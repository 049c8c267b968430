//! Configuration for loading and refreshing the stock feed

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Feed location used when nothing else is configured
pub const DEFAULT_SOURCE: &str = "data/processed/latest_stocks.json";

/// Upper bound on `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Environment variable overriding the feed location
pub const SOURCE_ENV_VAR: &str = "STOCK_FEED_SOURCE";

/// Configuration for dashboard operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Primary feed location: a file path or an http(s) URL
    pub source: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum number of attempts for HTTP feed requests
    pub max_retries: u32,

    /// Initial backoff duration for retries
    pub retry_backoff_base: Duration,

    /// How long a successfully loaded feed is reused before refetching
    pub cache_ttl: Duration,

    /// Quote requests per minute issued by the feed updater
    pub updater_rate_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff_base: Duration::from_millis(500),
            cache_ttl: Duration::from_secs(60),
            updater_rate_limit: 60,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load the feed location from `STOCK_FEED_SOURCE` if set
    pub fn with_env(mut self) -> Self {
        if let Ok(source) = std::env::var(SOURCE_ENV_VAR) {
            if !source.trim().is_empty() {
                self.source = source;
            }
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(DashboardError::ConfigError(
                "source must not be empty".to_string(),
            ));
        }

        if self.max_retries == 0 {
            return Err(DashboardError::ConfigError(
                "max_retries must be greater than 0".to_string(),
            ));
        }

        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(DashboardError::ConfigError(format!(
                "max_retries must be at most {MAX_RETRIES_LIMIT}"
            )));
        }

        if self.updater_rate_limit == 0 {
            return Err(DashboardError::ConfigError(
                "updater_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get retry backoff duration for attempt number; saturates at `Duration::MAX`
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        2_u32
            .checked_pow(attempt)
            .and_then(|factor| self.retry_backoff_base.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    source: Option<String>,
    request_timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_backoff_base: Option<Duration>,
    cache_ttl: Option<Duration>,
    updater_rate_limit: Option<u32>,
}

impl DashboardConfigBuilder {
    /// Set the feed location
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set maximum retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set retry backoff base duration
    pub fn retry_backoff_base(mut self, duration: Duration) -> Self {
        self.retry_backoff_base = Some(duration);
        self
    }

    /// Set feed cache TTL
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set updater requests per minute
    pub fn updater_rate_limit(mut self, per_minute: u32) -> Self {
        self.updater_rate_limit = Some(per_minute);
        self
    }

    /// Load the feed location from the environment unless set explicitly
    pub fn with_env(mut self) -> Self {
        if self.source.is_none() {
            if let Ok(source) = std::env::var(SOURCE_ENV_VAR) {
                if !source.trim().is_empty() {
                    self.source = Some(source);
                }
            }
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            source: self.source.unwrap_or(defaults.source),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_base: self
                .retry_backoff_base
                .unwrap_or(defaults.retry_backoff_base),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            updater_rate_limit: self
                .updater_rate_limit
                .unwrap_or(defaults.updater_rate_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
