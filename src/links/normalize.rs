// src/links/normalize.rs
// =============================================================================
// This module turns raw hrefs into crawlable URLs.
//
// Steps for every href:
// 1. Resolve it against the URL of the page it was found on
//    (RFC 3986 reference resolution, done by Url::join)
// 2. Drop the #fragment, so /page#top and /page are the same page
// 3. Keep it only if scheme, host and port match the crawl's origin
//
// This is the only place where "is this URL part of the site?" is decided.
// =============================================================================

use std::fmt;
use url::Url;

use crate::error::UrlError;

/// An absolute, fragment-free URL that belongs to the crawl's origin.
///
/// The only ways to build one are `Origin::from_seed` and `resolve`, so every
/// value has passed the same-origin check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (scheme, host, port) triple fixed by the seed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Origin {
    /// Parses the seed URL and derives the crawl origin from it.
    ///
    /// Returns the origin together with the normalized seed itself.
    pub fn from_seed(seed: &str) -> Result<(Origin, NormalizedUrl), String> {
        let mut url = Url::parse(seed.trim()).map_err(|e| e.to_string())?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!("unsupported scheme '{}'", url.scheme()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| "URL has no host".to_string())?
            .to_string();

        url.set_fragment(None);

        let origin = Origin {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
        };
        Ok((origin, NormalizedUrl(url)))
    }

    /// Exact match: no subdomains, no http -> https upgrade.
    ///
    /// Url::port() is None for the scheme's default port, so
    /// http://site.com and http://site.com:80 are the same origin.
    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.host.as_str())
            && url.port() == self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

/// Resolves `href` (as found on `page`) into an in-scope URL.
///
/// - `Err(UrlError)`: the href cannot be parsed at all
/// - `Ok(None)`: it parses, but points outside the origin
/// - `Ok(Some(url))`: a normalized, same-origin URL
///
/// Examples with page = "https://ex.com/a/b":
///   "c"                  -> https://ex.com/a/c
///   "/c", "../c"         -> https://ex.com/c
///   "#frag", ""          -> https://ex.com/a/b
///   "https://other.com/" -> None
///   "mailto:me@ex.com"   -> None
pub fn resolve(
    href: &str,
    page: &NormalizedUrl,
    origin: &Origin,
) -> Result<Option<NormalizedUrl>, UrlError> {
    // join() handles absolute, scheme-relative, path-relative and empty
    // references, and collapses "." / ".." segments
    let mut url = page.as_url().join(href).map_err(|source| UrlError {
        href: href.to_string(),
        source,
    })?;

    url.set_fragment(None);

    if origin.contains(&url) {
        Ok(Some(NormalizedUrl(url)))
    } else {
        Ok(None)
    }
}
