// src/typo/mod.rs
// =============================================================================
// This module handles typosquat seed generation.
//
// Submodules:
// - generator: single-edit misspellings of one domain
// - seeds: typo seeds + exclusion list, handed to the crawler
// =============================================================================

mod generator;
mod seeds;

pub use generator::generate_typos;
pub use seeds::SuspiciousUrlCrawler;
