// src/logging.rs
// =============================================================================
// Sets up `tracing` output.
//
// Logs go to stderr so that stdout only ever carries the sitemap XML
// (`sitemap-builder > sitemap.xml` must produce a clean file).
//
// RUST_LOG always wins; otherwise -v / -q pick the default level.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "sitemap_builder=debug"
    } else if quiet {
        "sitemap_builder=warn"
    } else {
        "sitemap_builder=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
