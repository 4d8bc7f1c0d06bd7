// src/sitemap/mod.rs
// =============================================================================
// This module writes the final sitemap.xml document.
//
// Output format (sitemaps.org protocol 0.9):
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/</loc>
//     </url>
//   </urlset>
//
// URLs are sorted before writing, so the same set of pages always produces
// byte-for-byte the same file, whatever order the crawl found them in.
//
// We use quick-xml's Writer, which escapes text (& -> &amp; etc.) for us.
// =============================================================================

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use crate::error::SitemapError;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Serializes a set of page URLs into a sitemap.xml document.
pub fn serialize<'a, I>(urls: I) -> Result<Vec<u8>, SitemapError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut locations: Vec<&str> = urls.into_iter().collect();
    locations.sort_unstable();
    locations.dedup();

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    writer.write_event(Event::Start(urlset))?;

    for location in locations {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(location)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = writer.into_inner().into_inner();
    xml.push(b'\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(urls: &[&str]) -> String {
        String::from_utf8(serialize(urls.iter().copied()).unwrap()).unwrap()
    }

    #[test]
    fn test_full_document() {
        let xml = to_string(&["https://example.com/about", "https://example.com/"]);
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  \
<url>\n    <loc>https://example.com/</loc>\n  </url>\n  \
<url>\n    <loc>https://example.com/about</loc>\n  </url>\n\
</urlset>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_sorted_regardless_of_input_order() {
        let a = to_string(&["https://ex.com/c", "https://ex.com/a", "https://ex.com/b"]);
        let b = to_string(&["https://ex.com/b", "https://ex.com/c", "https://ex.com/a"]);
        assert_eq!(a, b);

        let first = a.find("https://ex.com/a").unwrap();
        let second = a.find("https://ex.com/b").unwrap();
        let third = a.find("https://ex.com/c").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let xml = to_string(&["https://ex.com/search?a=1&b=2"]);
        assert!(xml.contains("<loc>https://ex.com/search?a=1&amp;b=2</loc>"));
    }

    #[test]
    fn test_empty_set() {
        let xml = to_string(&[]);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(SITEMAP_NAMESPACE));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_one_loc_per_url() {
        let xml = to_string(&["https://ex.com/", "https://ex.com/x", "https://ex.com/x"]);
        assert_eq!(xml.matches("<loc>").count(), 2);
    }
}
