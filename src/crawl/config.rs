// src/crawl/config.rs
// =============================================================================
// Settings for one crawl.
//
// All values come from the command line (see cli.rs); the defaults here are
// what you get when no flag is passed. The struct is Serialize so that the
// JSON report can echo the settings a sitemap was built with.
// =============================================================================

use serde::Serialize;
use std::time::Duration;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlConfig {
    /// Maximum number of fetches in flight (1 = strictly sequential)
    pub concurrency: usize,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// Extra attempts for transient failures (timeouts, 5xx, 429)
    pub retries: u32,
    /// Delay before the first retry, doubled for every further attempt
    pub retry_backoff: Duration,
    /// Stop the crawl after this long and keep what was found so far
    pub deadline: Option<Duration>,
    /// Maximum number of link hops from the seed (None = unlimited)
    pub max_depth: Option<usize>,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            request_timeout: Duration::from_secs(10),
            retries: 0,
            retry_backoff: Duration::from_millis(500),
            deadline: None,
            max_depth: None,
            user_agent: concat!("sitemap-builder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// How long to wait before retry number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        // 2^(attempt-1), capped so a silly --retries value can't overflow
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.retry_backoff.saturating_mul(factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retries, 0);
        assert!(config.deadline.is_none());
        assert!(config.max_depth.is_none());
        assert!(config.user_agent.starts_with("sitemap-builder/"));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CrawlConfig {
            concurrency: 0,
            ..CrawlConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CrawlConfig {
            request_timeout: Duration::ZERO,
            ..CrawlConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_backoff_doubles() {
        let config = CrawlConfig {
            retry_backoff: Duration::from_millis(100),
            ..CrawlConfig::default()
        };
        assert_eq!(config.backoff_for(1), Duration::from_millis(100));
        assert_eq!(config.backoff_for(2), Duration::from_millis(200));
        assert_eq!(config.backoff_for(3), Duration::from_millis(400));
    }
}
