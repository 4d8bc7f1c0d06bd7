// src/links/html.rs
// =============================================================================
// This module extracts anchor links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Is built on html5ever, which applies the standard HTML error recovery,
//   so unclosed or misnested tags never abort a parse
//
// Unlike a CSS selector query for "a[href]", we walk the tree ourselves:
// - anchors WITHOUT an href still count (their href is "")
// - anchors nested inside another anchor are not reported separately
//   (html5ever usually closes the outer one anyway; whatever tree it
//   builds is what we report)
//
// Rust concepts:
// - Lifetimes: Link iterators borrow the parsed document
// - impl Trait: Return a lazy iterator without naming its type
// =============================================================================

use scraper::{ElementRef, Html};
use std::fmt;

use crate::error::ParseError;

/// One `<a>` element as found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The raw href attribute (may be relative, empty or garbage)
    pub href: String,
    /// All descendant text, whitespace collapsed to single spaces
    pub text: String,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<a href='{}'>{}</a>", self.href, self.text)
    }
}

/// A parsed HTML page we can pull links out of.
pub struct LinkExtractor {
    document: Html,
}

impl LinkExtractor {
    /// Parses a page body.
    ///
    /// Fails only if the bytes are not text at all. Broken markup is
    /// recovered by the parser and never produces an error.
    pub fn parse(body: &[u8]) -> Result<Self, ParseError> {
        let html = std::str::from_utf8(body)?;
        Ok(Self::from_html(html))
    }

    pub fn from_html(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Returns every anchor in document order.
    ///
    /// The iterator is lazy and borrows the document, so calling `links()`
    /// again simply starts a fresh walk from the top.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        // descendants() is a depth-first, pre-order walk = document order
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| is_anchor(element) && !inside_anchor(element))
            .map(|anchor| Link {
                href: anchor.value().attr("href").unwrap_or_default().to_string(),
                text: collapse_whitespace(anchor.text()),
            })
    }
}

fn is_anchor(element: &ElementRef<'_>) -> bool {
    element.value().name() == "a"
}

// True if any ancestor of this element is itself an <a>
fn inside_anchor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_anchor(&ancestor))
}

// Joins text fragments and squashes every run of whitespace into one space
//
// Example: ["  Hello\n", "  <b>world</b> "] -> "Hello world"
fn collapse_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for fragment in fragments {
        joined.push_str(fragment);
    }
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does ElementRef::wrap do?
//    - The DOM tree holds many node kinds: elements, text, comments, ...
//    - ElementRef::wrap(node) returns Some(element) only for element nodes
//    - filter_map(ElementRef::wrap) therefore keeps only elements
//
// 2. Why `impl Iterator<Item = Link> + '_`?
//    - The real iterator type is a long chain of adapters
//    - `impl Iterator` hides it while keeping it zero-cost
//    - `'_` says the iterator borrows from `self` (the parsed document)
//
// 3. What is unwrap_or_default()?
//    - attr("href") returns Option<&str>
//    - unwrap_or_default() gives "" when the attribute is missing
//    - A missing href is not an error, it is just an empty link
//
// 4. Why split_whitespace()?
//    - It splits on any run of spaces, tabs and newlines
//    - and ignores leading/trailing whitespace
//    - Joining the pieces with " " gives the collapsed text
// -----------------------------------------------------------------------------
