// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr)
// 3. Crawl the site, stopping early on Ctrl-C
// 4. Write the sitemap (stdout or --output file) and print a summary
// 5. Exit with proper code (0 = complete, 1 = partial/cancelled, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod error;
mod fetch;
mod links;
mod logging;
mod sitemap;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cli::Cli;
use crawl::{CrawlConfig, CrawlOutcome, CrawlReport, Crawler};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every reachable page is in the sitemap
//   Ok(1) = sitemap written, but some pages failed or the crawl was stopped
//   Err   = no sitemap (bad seed, seed unreachable, output not writable)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig::from(&cli);
    let fetcher = HttpFetcher::new(&config).context("failed to build HTTP client")?;

    // Ctrl-C stops the crawl; whatever was fetched so far is still written
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing with the pages found so far");
            ctrl_c.cancel();
        }
    });

    let mut crawler = Crawler::new(fetcher, config.clone());
    let report = crawler
        .run(&cli.url, cancel)
        .await
        .with_context(|| format!("failed to crawl {}", cli.url))?;

    let xml = report.sitemap().context("failed to render sitemap")?;
    write_sitemap(&xml, &cli)?;

    if cli.json {
        let json = serde_json::json!({ "config": config, "report": report });
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_summary(&report);
    }

    Ok(match report.outcome() {
        CrawlOutcome::Complete => 0,
        CrawlOutcome::Partial | CrawlOutcome::Cancelled => 1,
    })
}

fn write_sitemap(xml: &[u8], cli: &Cli) -> Result<()> {
    match &cli.output {
        Some(path) => {
            std::fs::write(path, xml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "sitemap written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(xml).context("failed to write sitemap to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

// Human-readable summary on stderr (stdout is reserved for the XML)
fn print_summary(report: &CrawlReport) {
    if !report.failures.is_empty() {
        eprintln!();
        eprintln!("{:<70} {:<8} {}", "FAILED URL", "KIND", "REASON");
        eprintln!("{}", "=".repeat(100));
        for failure in &report.failures {
            let kind = match failure.kind {
                crawl::FailureKind::Fetch => "fetch",
                crawl::FailureKind::Parse => "parse",
            };
            eprintln!("{:<70} {:<8} {}", failure.url, kind, failure.message);
        }
    }

    eprintln!();
    eprintln!("📊 Summary ({}):", report.outcome());
    eprintln!("   📄 Pages in sitemap: {}", report.pages.len());
    eprintln!("   🔎 URLs discovered: {}", report.discovered);
    eprintln!("   ❌ Failed: {}", report.failures.len());
    if report.cancelled {
        eprintln!("   ⏹️  Crawl was stopped before finishing");
    }
}
