// src/crawl/report.rs
// =============================================================================
// What a finished (or cancelled) crawl hands back.
//
// A report always exists once the seed page was fetched:
// - complete:  every reachable page was fetched
// - partial:   some pages failed, the sitemap lists the rest
// - cancelled: the crawl was stopped early, the sitemap lists what was
//              fetched up to that point
// =============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::SitemapError;
use crate::sitemap;

/// Why a page is listed as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The page could not be downloaded; it is NOT in the sitemap
    Fetch,
    /// The page was downloaded but its body was unreadable; it is in the
    /// sitemap but none of its links were followed
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    Complete,
    Partial,
    Cancelled,
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CrawlOutcome::Complete => "complete",
            CrawlOutcome::Partial => "partial",
            CrawlOutcome::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The normalized seed URL
    pub seed: String,
    /// Pages that were fetched successfully, sorted
    pub pages: BTreeSet<String>,
    /// Pages that failed, sorted by URL
    pub failures: Vec<PageFailure>,
    /// Every in-scope URL discovered, fetched or not
    pub discovered: usize,
    /// True if the crawl stopped before the frontier was exhausted
    pub cancelled: bool,
}

impl CrawlReport {
    pub(crate) fn new(seed: &str) -> Self {
        Self {
            seed: seed.to_string(),
            pages: BTreeSet::new(),
            failures: Vec::new(),
            discovered: 0,
            cancelled: false,
        }
    }

    pub fn outcome(&self) -> CrawlOutcome {
        if self.cancelled {
            CrawlOutcome::Cancelled
        } else if self.failures.is_empty() {
            CrawlOutcome::Complete
        } else {
            CrawlOutcome::Partial
        }
    }

    /// Renders the fetched pages as a sitemap.xml document.
    pub fn sitemap(&self) -> Result<Vec<u8>, SitemapError> {
        sitemap::serialize(self.pages.iter().map(String::as_str))
    }

    pub(crate) fn record_failure(&mut self, url: &str, kind: FailureKind, message: String) {
        self.failures.push(PageFailure {
            url: url.to_string(),
            kind,
            message,
        });
    }

    // With several fetches in flight, failures arrive in completion order
    pub(crate) fn finish(&mut self) {
        self.failures.sort_by(|a, b| a.url.cmp(&b.url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        let mut report = CrawlReport::new("https://ex.com/");
        report.pages.insert("https://ex.com/".to_string());
        assert_eq!(report.outcome(), CrawlOutcome::Complete);

        report.record_failure("https://ex.com/dead", FailureKind::Fetch, "HTTP 404".to_string());
        assert_eq!(report.outcome(), CrawlOutcome::Partial);

        report.cancelled = true;
        assert_eq!(report.outcome(), CrawlOutcome::Cancelled);
    }

    #[test]
    fn test_failures_sorted_on_finish() {
        let mut report = CrawlReport::new("https://ex.com/");
        report.record_failure("https://ex.com/z", FailureKind::Fetch, "HTTP 500".to_string());
        report.record_failure("https://ex.com/a", FailureKind::Parse, "bad".to_string());
        report.finish();

        let urls: Vec<_> = report.failures.iter().map(|f| f.url.as_str()).collect();
        assert_eq!(urls, vec!["https://ex.com/a", "https://ex.com/z"]);
    }

    #[test]
    fn test_report_json() {
        let mut report = CrawlReport::new("https://ex.com/");
        report.pages.insert("https://ex.com/".to_string());
        report.record_failure("https://ex.com/dead", FailureKind::Fetch, "HTTP 404".to_string());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], "https://ex.com/");
        assert_eq!(json["pages"][0], "https://ex.com/");
        assert_eq!(json["failures"][0]["kind"], "fetch");
        assert_eq!(json["cancelled"], false);
    }

    #[test]
    fn test_sitemap_lists_pages_only() {
        let mut report = CrawlReport::new("https://ex.com/");
        report.pages.insert("https://ex.com/".to_string());
        report.record_failure("https://ex.com/dead", FailureKind::Fetch, "HTTP 404".to_string());

        let xml = String::from_utf8(report.sitemap().unwrap()).unwrap();
        assert!(xml.contains("<loc>https://ex.com/</loc>"));
        assert!(!xml.contains("dead"));
    }
}
