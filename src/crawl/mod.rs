// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-origin restriction (scheme + host + port of the seed)
// - Bounded number of concurrent fetches
// - Every page fetched at most once, even on sites full of cycles
// - Cancellation (Ctrl-C / deadline) keeps the pages found so far
//
// Submodules:
// - config: CrawlConfig and its defaults
// - frontier: Queue of URLs to fetch + set of URLs already seen
// - engine: The crawl loop and its failure policy
// - report: What a crawl returns (pages, failures, outcome)
// =============================================================================

mod config;
mod engine;
mod frontier;
mod report;

pub use config::CrawlConfig;
pub use engine::{CrawlState, Crawler};
pub use report::{CrawlOutcome, CrawlReport, FailureKind};
