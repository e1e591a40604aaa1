// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Subcommands:
// - crawl:      crawl outward from one starting URL
// - suspicious: crawl outward from typos of popular domains
// - typos:      print the typos of one domain
// =============================================================================

use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{CrawlConfig, DEFAULT_TARGET_SUCCESSES, DEFAULT_WORKERS};
use crate::domains::{DEFAULT_BENIGN_DOMAINS, DEFAULT_POPULAR_DOMAINS};

#[derive(Parser, Debug)]
#[command(
    name = "typo-crawler",
    version,
    about = "Crawl the web from typo-squatted domains to find suspicious URLs",
    long_about = "typo-crawler follows links concurrently from a starting URL, or from \
                  misspellings of popular domains, and prints every page it could load."
)]
pub struct Cli {
    /// Log every crawled URL and every failed fetch to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl outward from a single starting URL
    ///
    /// Example: typo-crawler crawl https://example.com --target 20
    Crawl {
        /// Starting URL (e.g., https://example.com)
        ///
        /// When omitted, it is asked for interactively
        start_url: Option<String>,

        #[command(flatten)]
        options: CrawlArgs,
    },

    /// Crawl outward from typos of popular domains
    ///
    /// Example: typo-crawler suspicious --popular data/popular_domains.txt
    Suspicious {
        /// File with popular domains, one per line
        #[arg(long, default_value = DEFAULT_POPULAR_DOMAINS)]
        popular: PathBuf,

        /// File with known-benign lookalike domains, one per line
        #[arg(long, default_value = DEFAULT_BENIGN_DOMAINS)]
        benign: PathBuf,

        #[command(flatten)]
        options: CrawlArgs,
    },

    /// Print every single-edit typo of a domain
    ///
    /// Example: typo-crawler typos google.com
    Typos {
        /// Domain to misspell
        domain: String,
    },
}

// Flags shared by every subcommand that runs a crawl
#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    /// Stop after this many pages loaded successfully
    #[arg(long, default_value_t = DEFAULT_TARGET_SUCCESSES)]
    pub target: usize,

    /// Number of concurrent fetch workers
    #[arg(long, default_value_t = DEFAULT_WORKERS, value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub workers: usize,

    /// Stop dispatching new URLs after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output results in JSON format instead of one URL per line
    #[arg(long)]
    pub json: bool,
}

impl CrawlArgs {
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            workers: self.workers,
            target_successes: self.target,
            time_limit: self.timeout_secs.map(Duration::from_secs),
            ..CrawlConfig::default()
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It inlines the fields of another struct (CrawlArgs) as flags
//    - Both `crawl` and `suspicious` get --target, --workers, etc.
//
// 2. Why Option<String> for start_url?
//    - clap treats Option fields as optional positional arguments
//    - None means the user didn't pass one, so we prompt for it
//
// 3. What is global = true?
//    - The flag can appear before or after the subcommand:
//      `typo-crawler -v crawl` and `typo-crawler crawl -v` both work
// -----------------------------------------------------------------------------
