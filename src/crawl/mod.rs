// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Submodules:
// - resolve: turns hrefs into absolute URLs (or "ignore")
// - exclusion: label-wise domain exclusion checks
// - pool: the fixed-size fetch worker pool
// - frontier: the crawl loop that ties it all together
//
// Features:
// - Depth-first crawling from any number of seed URLs
// - Each URL is fetched at most once per run
// - Stops after a target number of successful pages
// - Skips excluded domains and their subdomains
// =============================================================================

mod exclusion;
mod frontier;
mod pool;
mod resolve;

pub use frontier::{CrawlReport, Crawler};
pub use resolve::is_valid_start_url;
