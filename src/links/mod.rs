// src/links/mod.rs
// =============================================================================
// This module finds the links on a page and decides which ones to follow.
//
// Submodules:
// - html: Pulls every <a> element (href + text) out of an HTML page
// - normalize: Resolves hrefs to absolute URLs and applies the
//   same-origin filter
// =============================================================================

mod html;
mod normalize;

pub use html::{Link, LinkExtractor};
pub use normalize::{resolve, NormalizedUrl, Origin};
