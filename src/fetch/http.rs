// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP(S) with reqwest.
//
// Key functionality:
// - One shared Client (connection pooling across the whole crawl)
// - Per-request timeout and a custom User-Agent
// - Follows up to 10 redirects
// - Any non-2xx status is a FetchError::Status
//
// Rust concepts:
// - async/await: Network I/O without blocking the thread
// - From trait: `?` turns reqwest::Error into our FetchError
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::Fetcher;
use crate::crawl::CrawlConfig;
use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;

/// The default `Fetcher`, backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the HTTP client from the crawl configuration.
    pub fn new(config: &CrawlConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // 2xx = we have a page; everything else counts as a failed fetch
        // (3xx only shows up here when the redirect limit was hit)
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "fetched page");

        Ok(body.to_vec())
    }
}
