// src/fetch/html.rs
// =============================================================================
// This module pulls raw href values out of HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The hrefs are returned exactly as written in the page. Turning them into
// absolute URLs is the resolver's job (see crawl/resolve.rs).
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Turns a raw page body into the set of href values of its anchors.
pub trait LinkExtractor: Send + Sync {
    fn extract_hrefs(&self, body: &[u8]) -> HashSet<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_hrefs(&self, body: &[u8]) -> HashSet<String> {
        let document = Html::parse_document(&decode_body(body));

        // "a[href]" means "all <a> tags that have an href attribute"
        // The selector is a constant, so parsing it can only fail on a typo here
        let selector = Selector::parse("a[href]").expect("a[href] is a valid selector");

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect()
    }
}

// Decodes a page body into text
//
// Valid UTF-8 is used as-is. Anything else is read as ISO-8859-1, where every
// byte maps to the code point with the same value, so decoding never fails.
fn decode_body(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => body.iter().map(|&b| b as char).collect(),
    }
}
