// src/fetch/mod.rs
// =============================================================================
// This module holds the two collaborators the crawler talks to:
//
// - http: a Fetcher turns a URL into a status code + raw body bytes
// - html: a LinkExtractor turns raw body bytes into raw href strings
//
// The crawl engine only ever sees the traits, so tests can swap in
// in-memory implementations instead of hitting the network.
//
// Rust concepts:
// - Traits: Shared behaviour that several types can implement
// - Trait objects (dyn Trait): Pick the implementation at runtime
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

mod html;
mod http;

pub use html::{HtmlLinkExtractor, LinkExtractor};
pub use http::{FetchError, FetchedPage, Fetcher, HttpFetcher};
