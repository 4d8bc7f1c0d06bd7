// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is a plain struct, and clap generates the
// parsing, --help and --version output from the attributes.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - From trait: Turn the parsed flags into a CrawlConfig
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::crawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-builder",
    version,
    about = "Crawl a website and print its sitemap.xml",
    long_about = "sitemap-builder starts at one URL, follows every link that stays on the same \
                  scheme and host, and prints a sitemaps.org XML document listing all pages it \
                  could fetch. Entries are sorted, so re-running on an unchanged site gives an \
                  identical file."
)]
pub struct Cli {
    /// URL to build the sitemap for
    #[arg(long, default_value = "http://calhoun.io")]
    pub url: String,

    /// Write the sitemap to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the crawl report as JSON (on stderr) instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Number of pages fetched at the same time
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Retry timeouts, connection errors, 429 and 5xx responses this many times
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Delay before the first retry in milliseconds (doubles every attempt)
    #[arg(long, default_value_t = 500)]
    pub retry_backoff_ms: u64,

    /// Stop crawling after this many seconds and write what was found
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Only follow links up to this many hops away from the seed
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Show debug logs (RUST_LOG overrides this)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl From<&Cli> for CrawlConfig {
    fn from(cli: &Cli) -> Self {
        let defaults = CrawlConfig::default();
        CrawlConfig {
            concurrency: cli.concurrency,
            request_timeout: Duration::from_secs(cli.timeout),
            retries: cli.retries,
            retry_backoff: Duration::from_millis(cli.retry_backoff_ms),
            deadline: cli.deadline.map(Duration::from_secs),
            max_depth: cli.max_depth,
            user_agent: cli.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_crawl_config() {
        let cli = Cli::parse_from(["sitemap-builder"]);
        let config = CrawlConfig::from(&cli);
        let defaults = CrawlConfig::default();

        assert_eq!(cli.url, "http://calhoun.io");
        assert_eq!(config.concurrency, defaults.concurrency);
        assert_eq!(config.request_timeout, defaults.request_timeout);
        assert_eq!(config.retries, defaults.retries);
        assert_eq!(config.retry_backoff, defaults.retry_backoff);
        assert_eq!(config.deadline, None);
        assert_eq!(config.user_agent, defaults.user_agent);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "sitemap-builder",
            "--url",
            "https://example.com",
            "-o",
            "sitemap.xml",
            "--concurrency",
            "1",
            "--retries",
            "2",
            "--deadline",
            "30",
            "--max-depth",
            "3",
        ]);
        let config = CrawlConfig::from(&cli);

        assert_eq!(cli.url, "https://example.com");
        assert_eq!(cli.output, Some(PathBuf::from("sitemap.xml")));
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.retries, 2);
        assert_eq!(config.deadline, Some(Duration::from_secs(30)));
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["sitemap-builder", "-v", "-q"]).is_err());
    }
}
