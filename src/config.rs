// src/config.rs
// =============================================================================
// Tuning knobs for one crawl run.
//
// The CLI fills these from its flags (see cli.rs); everything not given on
// the command line falls back to `CrawlConfig::default()`.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 50;
pub const DEFAULT_TARGET_SUCCESSES: usize = 100;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Number of concurrent fetch workers
    pub workers: usize,
    /// Stop dispatching once this many pages loaded successfully
    pub target_successes: usize,
    /// Longest the crawl loop waits for a finished fetch before it goes
    /// back to draining the frontier
    pub poll_interval: Duration,
    /// Optional wall-clock limit for dispatching new work
    pub time_limit: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            target_successes: DEFAULT_TARGET_SUCCESSES,
            poll_interval: DEFAULT_POLL_INTERVAL,
            time_limit: None,
        }
    }
}
