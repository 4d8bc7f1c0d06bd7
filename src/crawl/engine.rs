// src/crawl/engine.rs
// =============================================================================
// This module runs a crawl: fetch -> extract links -> filter -> enqueue,
// until there is nothing left to fetch.
//
// How it works:
// 1. The seed URL fixes the origin and is the first URL in the frontier
// 2. Up to `concurrency` pages are fetched at the same time
// 3. When a fetch finishes, its in-scope links go through the frontier,
//    which queues only URLs it has never seen
// 4. The crawl is done when the frontier is empty AND no fetch is running
//    (a running fetch may still discover new pages)
//
// Failure policy:
// - seed cannot be fetched      -> the whole crawl fails (nothing to build)
// - another page cannot be fetched -> recorded, left out of the sitemap
// - a page body cannot be parsed  -> recorded, kept in the sitemap, no links
// - an href cannot be resolved    -> dropped, the rest of the page is used
//
// Cancellation (Ctrl-C or --deadline) stops new fetches, abandons the ones
// in flight and returns what was found so far.
//
// Rust concepts:
// - FuturesUnordered: A set of futures polled together, yielding results
//   in whatever order they complete
// - tokio::select!: Wait for whichever of several events happens first
// =============================================================================

use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::config::CrawlConfig;
use super::frontier::{Frontier, QueuedUrl};
use super::report::{CrawlReport, FailureKind};
use crate::error::{CrawlError, FetchError, ParseError};
use crate::fetch::Fetcher;
use crate::links::{resolve, LinkExtractor, NormalizedUrl, Origin};

/// Lifecycle of a crawler: it runs exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Running,
    Done,
}

/// Crawls one site. Owns the frontier and visited set for the whole crawl.
pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
    state: CrawlState,
}

// The result of fetching and reading one page
struct Visit {
    page: QueuedUrl,
    outcome: VisitOutcome,
}

enum VisitOutcome {
    Fetched(Vec<NormalizedUrl>),
    Unparsable(ParseError),
    Failed(FetchError),
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config,
            state: CrawlState::Idle,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Crawls everything reachable from `seed` on the same origin.
    ///
    /// Returns an error only if the seed itself is invalid or cannot be
    /// fetched. Any other failure ends up in the report.
    pub async fn run(
        &mut self,
        seed: &str,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        if self.state != CrawlState::Idle {
            return Err(CrawlError::AlreadyStarted);
        }
        self.config.validate()?;

        let (origin, seed_url) = Origin::from_seed(seed).map_err(|reason| {
            CrawlError::InvalidSeed {
                seed: seed.to_string(),
                reason,
            }
        })?;

        self.state = CrawlState::Running;
        info!(seed = %seed_url, origin = %origin, concurrency = self.config.concurrency, "crawl started");

        let result = self.crawl(&origin, seed_url, cancel).await;

        self.state = CrawlState::Done;
        match &result {
            Ok(report) => info!(
                pages = report.pages.len(),
                failures = report.failures.len(),
                outcome = %report.outcome(),
                "crawl finished"
            ),
            Err(e) => warn!(error = %e, "crawl aborted"),
        }
        result
    }

    async fn crawl(
        &self,
        origin: &Origin,
        seed: NormalizedUrl,
        cancel: CancellationToken,
    ) -> Result<CrawlReport, CrawlError> {
        let mut report = CrawlReport::new(seed.as_str());
        let mut frontier = Frontier::seeded(seed.clone());
        let mut in_flight = FuturesUnordered::new();

        let deadline = sleep_or_forever(self.config.deadline);
        tokio::pin!(deadline);

        let exhausted = loop {
            if !cancel.is_cancelled() {
                while in_flight.len() < self.config.concurrency {
                    match frontier.pop() {
                        Some(page) => in_flight.push(self.visit(page, origin)),
                        None => break,
                    }
                }
            }

            if in_flight.is_empty() {
                break frontier.is_empty();
            }

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!(in_flight = in_flight.len(), "crawl cancelled");
                    break false;
                }
                _ = &mut deadline => {
                    info!(in_flight = in_flight.len(), "crawl deadline reached");
                    break false;
                }
                Some(visit) = in_flight.next() => {
                    self.record(visit, &seed, &mut frontier, &mut report)?;
                }
            }
        };

        // Dropping the pending futures abandons any fetch still running
        drop(in_flight);

        report.cancelled = !exhausted;
        report.discovered = frontier.discovered();
        report.finish();
        Ok(report)
    }

    // Fetches one page and pulls the in-scope links out of it
    async fn visit(&self, page: QueuedUrl, origin: &Origin) -> Visit {
        let outcome = match self.fetch_with_retries(&page.url).await {
            Ok(body) => match discover_links(&body, &page.url, origin) {
                Ok(links) => VisitOutcome::Fetched(links),
                Err(e) => VisitOutcome::Unparsable(e),
            },
            Err(e) => VisitOutcome::Failed(e),
        };
        Visit { page, outcome }
    }

    async fn fetch_with_retries(&self, url: &NormalizedUrl) -> Result<Vec<u8>, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url.as_url()).await {
                Err(e) if e.is_transient() && attempt < self.config.retries => {
                    attempt += 1;
                    let delay = self.config.backoff_for(attempt);
                    debug!(url = %url, error = %e, attempt, ?delay, "retrying fetch");
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    // Applies the failure policy to one finished visit
    fn record(
        &self,
        visit: Visit,
        seed: &NormalizedUrl,
        frontier: &mut Frontier,
        report: &mut CrawlReport,
    ) -> Result<(), CrawlError> {
        let Visit { page, outcome } = visit;

        match outcome {
            VisitOutcome::Fetched(links) => {
                report.pages.insert(page.url.to_string());
                self.enqueue(links, page.depth + 1, frontier);
                debug!(url = %page.url, depth = page.depth, pending = frontier.pending(), "page crawled");
            }
            VisitOutcome::Unparsable(e) => {
                warn!(url = %page.url, error = %e, "page body unreadable, not following its links");
                report.pages.insert(page.url.to_string());
                report.record_failure(page.url.as_str(), FailureKind::Parse, e.to_string());
            }
            VisitOutcome::Failed(e) if page.url == *seed => {
                return Err(CrawlError::SeedUnreachable {
                    url: page.url.to_string(),
                    source: e,
                });
            }
            VisitOutcome::Failed(e) => {
                warn!(url = %page.url, error = %e, "failed to fetch page");
                report.record_failure(page.url.as_str(), FailureKind::Fetch, e.to_string());
            }
        }
        Ok(())
    }

    fn enqueue(&self, links: Vec<NormalizedUrl>, depth: usize, frontier: &mut Frontier) {
        if let Some(max_depth) = self.config.max_depth {
            if depth > max_depth {
                return;
            }
        }
        for link in links {
            let url = link.to_string();
            if frontier.insert_if_new(link, depth) {
                trace!(url = %url, depth, "queued");
            }
        }
    }
}

// Parses a body and keeps the links that stay on the origin
fn discover_links(
    body: &[u8],
    page: &NormalizedUrl,
    origin: &Origin,
) -> Result<Vec<NormalizedUrl>, ParseError> {
    let extractor = LinkExtractor::parse(body)?;
    let mut found = Vec::new();

    for link in extractor.links() {
        match resolve(&link.href, page, origin) {
            Ok(Some(url)) => found.push(url),
            Ok(None) => trace!(page = %page, href = %link.href, "out of scope"),
            Err(e) => debug!(page = %page, text = %link.text, error = %e, "dropping link"),
        }
    }

    Ok(found)
}

async fn sleep_or_forever(deadline: Option<Duration>) {
    match deadline {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}
