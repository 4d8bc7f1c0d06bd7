// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler downloads pages.
//
// The crawl engine only needs one capability: "give me the body of this URL".
// It is expressed as the `Fetcher` trait so that:
// - the real program uses HttpFetcher (reqwest)
// - tests can plug in an in-memory site instead of the network
//
// Submodules:
// - http: The reqwest-based implementation
// =============================================================================

mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Downloads the body of a page.
///
/// Implementations handle transport details (TLS, redirects, timeouts);
/// any non-success response must be reported as an error.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}
