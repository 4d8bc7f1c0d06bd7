// src/error.rs
// =============================================================================
// Typed errors for the crawl core.
//
// Every fallible step of a crawl reports one of these, and the crawl engine
// decides what each one means:
// - UrlError:   one href could not be resolved      -> drop the link
// - ParseError: one page body could not be parsed   -> page has no links
// - FetchError: one page could not be downloaded    -> fatal only for the seed
//
// The binary layer (main.rs) wraps these in anyhow::Error with context.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

/// A page could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// The request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// DNS failure, refused connection, TLS handshake failure, ...
    #[error("connection failed: {0}")]
    Connect(String),
    /// The redirect chain was too long (or looped)
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Whether retrying the same request later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect(_) => true,
            FetchError::Status(code) => *code == 429 || (500..600).contains(code),
            FetchError::TooManyRedirects | FetchError::Other(_) => false,
        }
    }
}

// Classifies reqwest errors the same way the link checker used to label
// broken links (timeout / redirect loop / connection problem / other).
impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

/// A fetched body could not be turned into a document at all.
///
/// Broken markup is not an error: html5ever recovers from it.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("body is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// A single href could not be resolved into a URL.
#[derive(Debug, Error)]
#[error("cannot resolve href {href:?}: {source}")]
pub struct UrlError {
    pub href: String,
    #[source]
    pub source: url::ParseError,
}

/// Invalid crawl configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("concurrency must be greater than 0")]
    ZeroConcurrency,
    #[error("request timeout must be greater than 0")]
    ZeroTimeout,
}

/// A crawl that produced no sitemap at all.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL {seed:?}: {reason}")]
    InvalidSeed { seed: String, reason: String },

    #[error("seed URL {url} could not be fetched: {source}")]
    SeedUnreachable {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("this crawler has already been run")]
    AlreadyStarted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Writing the sitemap document failed. Only happens on a broken invariant.
#[derive(Debug, Error)]
#[error("failed to write sitemap: {0}")]
pub struct SitemapError(#[from] pub quick_xml::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Connect("refused".to_string()).is_transient());
        assert!(FetchError::Status(503).is_transient());
        assert!(FetchError::Status(429).is_transient());
    }

    #[test]
    fn test_permanent_errors() {
        assert!(!FetchError::Status(404).is_transient());
        assert!(!FetchError::Status(410).is_transient());
        assert!(!FetchError::TooManyRedirects.is_transient());
        assert!(!FetchError::Other("boom".to_string()).is_transient());
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_seed_unreachable_mentions_url() {
        let err = CrawlError::SeedUnreachable {
            url: "https://example.com/".to_string(),
            source: FetchError::Status(500),
        };
        let message = err.to_string();
        assert!(message.contains("https://example.com/"));
        assert!(message.contains("HTTP 500"));
    }
}
