// src/typo/seeds.rs
// =============================================================================
// Turns a list of popular domains into crawl seeds for typosquat hunting.
//
// - Seeds: every typo of every popular domain, as "http://<typo>"
// - Exclusions: the popular domains themselves plus known-benign lookalikes,
//   so the crawl never wanders back onto the legitimate sites
// =============================================================================

use std::collections::HashSet;

use super::generator::generate_typos;
use crate::crawl::{CrawlReport, Crawler};

pub const SEED_SCHEME: &str = "http://";

/// Typo URLs for every popular domain, unioned.
pub fn build_seeds<S: AsRef<str>>(popular: &[S]) -> HashSet<String> {
    popular
        .iter()
        .flat_map(|domain| generate_typos(domain.as_ref()))
        .map(|typo| format!("{}{}", SEED_SCHEME, typo))
        .collect()
}

/// Popular domains followed by benign ones.
pub fn build_exclusions(popular: &[String], benign: &[String]) -> Vec<String> {
    popular.iter().chain(benign).cloned().collect()
}

// Crawls the web starting from typos of popular domains
pub struct SuspiciousUrlCrawler {
    crawler: Crawler,
}

impl SuspiciousUrlCrawler {
    pub fn new(crawler: Crawler) -> Self {
        Self { crawler }
    }

    pub async fn find_suspicious_urls(&self, popular: &[String], benign: &[String]) -> CrawlReport {
        let seeds = build_seeds(popular);
        let excluded = build_exclusions(popular, benign);

        tracing::info!(
            "{} typo seed(s) from {} popular domain(s), {} exclusion(s)",
            seeds.len(),
            popular.len(),
            excluded.len()
        );

        self.crawler.scrape(seeds, excluded.as_slice()).await
    }
}
