// src/crawl/frontier.rs
// =============================================================================
// The crawl loop: decides what to fetch next and collects what came back.
//
// How it works:
// 1. Push every seed URL onto the frontier (a stack, so the crawl goes
//    depth-first)
// 2. Pop a URL; skip it if it was dispatched before or is excluded
// 3. Otherwise mark it visited and hand it to the worker pool
// 4. Wait briefly (poll interval) for any fetch to finish
// 5. Successful pages count towards the target and their links are pushed
//    onto the frontier; failed pages are only logged
// 6. Repeat until the target is reached or there is nothing left to do,
//    then shut the pool down, which waits for in-flight fetches
//
// All crawl state lives in `CrawlState` and is only touched by this loop.
// Workers report back through the pool's results channel.
//
// Rust concepts:
// - Vec as a stack: push() / pop() both work on the end
// - HashSet: O(1) "have we seen this URL?" checks
// - Arc<dyn Trait>: shared, swappable collaborators
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::exclusion::is_excluded;
use super::pool::{FetchOutcome, WorkerPool};
use crate::config::CrawlConfig;
use crate::fetch::{Fetcher, LinkExtractor};

/// What a finished crawl run found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// URLs that loaded with a success status
    pub successful: HashSet<String>,
    /// Every URL that was dispatched, successful or not
    pub visited: HashSet<String>,
}

// Mutable state of one crawl run, built fresh by every `scrape` call
#[derive(Debug, Default)]
struct CrawlState {
    frontier: Vec<String>,
    visited: HashSet<String>,
    successful: HashSet<String>,
    in_flight: HashSet<String>,
}

impl CrawlState {
    fn seeded<I: IntoIterator<Item = String>>(seeds: I) -> Self {
        Self {
            frontier: seeds.into_iter().collect(),
            ..Self::default()
        }
    }

    fn has_work(&self) -> bool {
        !self.frontier.is_empty() || !self.in_flight.is_empty()
    }

    fn record(&mut self, url: String, outcome: FetchOutcome) {
        self.in_flight.remove(&url);

        match outcome {
            FetchOutcome::Success(links) => {
                debug!("fetched {} ({} links)", url, links.len());
                self.successful.insert(url);
                self.frontier.extend(links);
            }
            FetchOutcome::Failure(reason) => {
                // Stays in `visited`, so it is never retried
                debug!("failed {}: {}", url, reason);
            }
        }
    }
}

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Crawler {
    pub fn new(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    /// Crawls outward from `seeds` until `target_successes` pages loaded or
    /// the frontier and in-flight work both ran dry.
    ///
    /// URLs whose host falls under one of `excluded` are never fetched.
    /// Returns only after every dispatched fetch has finished.
    pub async fn scrape<I, S>(&self, seeds: I, excluded: &[S]) -> CrawlReport
    where
        I: IntoIterator<Item = String>,
        S: AsRef<str>,
    {
        let mut state = CrawlState::seeded(seeds);
        let mut pool = WorkerPool::spawn(
            self.config.workers,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
        );
        let deadline = self.config.time_limit.map(|limit| Instant::now() + limit);

        info!(
            "crawl started: {} seed(s), target {}, {} worker(s)",
            state.frontier.len(),
            self.config.target_successes,
            self.config.workers
        );

        while state.successful.len() < self.config.target_successes && state.has_work() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                warn!(
                    "time limit reached with {} of {} successful page(s)",
                    state.successful.len(),
                    self.config.target_successes
                );
                break;
            }

            if let Some(url) = state.frontier.pop() {
                // Checks whether the url was already dispatched, to prevent
                // loops, or if it should be excluded
                if state.visited.contains(&url) || is_excluded(&url, excluded) {
                    continue;
                }

                debug!("crawling: {}", url);
                state.visited.insert(url.clone());
                state.in_flight.insert(url.clone());
                pool.submit(url);
            }

            for (url, outcome) in pool.poll(self.config.poll_interval).await {
                state.record(url, outcome);
            }

            if pool.is_closed() {
                warn!(
                    "all crawl workers stopped, {} fetch(es) lost",
                    state.in_flight.len()
                );
                state.in_flight.clear();
                break;
            }
        }

        if !state.in_flight.is_empty() {
            debug!("waiting for {} in-flight fetch(es)", state.in_flight.len());
        }
        pool.shutdown().await;

        info!(
            "crawl finished: {} successful of {} visited",
            state.successful.len(),
            state.visited.len()
        );

        CrawlReport {
            successful: state.successful,
            visited: state.visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchedPage, HtmlLinkExtractor};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // In-memory web: URL -> (status, html). Unknown URLs fail to connect.
    // Every fetch is recorded so tests can count dispatches.
    #[derive(Default)]
    struct FakeWeb {
        pages: HashMap<String, (u16, String)>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeWeb {
        fn page(mut self, url: &str, status: u16, html: &str) -> Self {
            self.pages.insert(url.to_string(), (status, html.to_string()));
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for FakeWeb {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            self.fetched.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some((status, html)) => Ok(FetchedPage {
                    status: *status,
                    body: html.as_bytes().to_vec(),
                }),
                None => Err(FetchError::Connect(format!("no route to {}", url))),
            }
        }
    }

    fn crawler(web: Arc<FakeWeb>, target: usize) -> Crawler {
        let config = CrawlConfig {
            workers: 4,
            target_successes: target,
            poll_interval: Duration::from_millis(50),
            time_limit: None,
        };
        Crawler::new(config, web, Arc::new(HtmlLinkExtractor))
    }

    fn seeds(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|url| url.to_string()).collect()
    }

    const NO_EXCLUSIONS: [&str; 0] = [];

    #[tokio::test]
    async fn test_stops_at_target() {
        let web = Arc::new(
            FakeWeb::default()
                .page(
                    "http://a.test",
                    200,
                    r##"<a href="http://b.test">b</a><a href="#frag">f</a><a href="/c">c</a>"##,
                )
                .page("http://b.test", 200, "")
                .page("http://a.test/c", 200, ""),
        );

        let report = crawler(web, 2)
            .scrape(seeds(&["http://a.test"]), &NO_EXCLUSIONS)
            .await;

        assert_eq!(report.successful.len(), 2);
        assert!(report.successful.contains("http://a.test"));
        assert!(report.successful.iter().all(|url| !url.contains('#')));
    }

    #[tokio::test]
    async fn test_each_url_dispatched_once() {
        // a <-> b cycle, both link to c, c links back to a
        let web = Arc::new(
            FakeWeb::default()
                .page("http://a.test", 200, r#"<a href="http://b.test">b</a><a href="http://c.test">c</a>"#)
                .page("http://b.test", 200, r#"<a href="http://a.test">a</a><a href="http://c.test">c</a>"#)
                .page("http://c.test", 200, r#"<a href="http://a.test">a</a>"#),
        );

        let report = crawler(web.clone(), 100)
            .scrape(seeds(&["http://a.test", "http://a.test"]), &NO_EXCLUSIONS)
            .await;

        let fetched = web.fetched();
        let distinct: HashSet<String> = fetched.iter().cloned().collect();
        assert_eq!(fetched.len(), distinct.len());
        assert_eq!(report.visited.len(), fetched.len());
        assert_eq!(report.successful.len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_frontier_returns_partial_result() {
        let web = Arc::new(
            FakeWeb::default()
                .page("http://a.test", 200, r#"<a href="http://missing.test">m</a>"#),
        );

        let report = crawler(web, 10)
            .scrape(seeds(&["http://a.test"]), &NO_EXCLUSIONS)
            .await;

        assert_eq!(report.successful, HashSet::from(["http://a.test".to_string()]));
        assert_eq!(report.visited.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_visited_not_successful() {
        let web = Arc::new(
            FakeWeb::default()
                .page("http://a.test", 200, r#"<a href="http://gone.test">g</a>"#)
                .page("http://gone.test", 404, r#"<a href="http://hidden.test">h</a>"#)
                .page("http://hidden.test", 200, ""),
        );

        let report = crawler(web.clone(), 10)
            .scrape(seeds(&["http://a.test"]), &NO_EXCLUSIONS)
            .await;

        assert!(report.visited.contains("http://gone.test"));
        assert!(!report.successful.contains("http://gone.test"));
        // links on a failed page are not followed
        assert!(!web.fetched().contains(&"http://hidden.test".to_string()));
    }

    #[tokio::test]
    async fn test_excluded_urls_never_fetched() {
        let web = Arc::new(
            FakeWeb::default()
                .page(
                    "http://typo.test",
                    200,
                    r#"<a href="http://www.popular.com/login">p</a><a href="http://other.test">o</a>"#,
                )
                .page("http://other.test", 200, "")
                .page("http://popular.com", 200, ""),
        );

        let report = crawler(web.clone(), 10)
            .scrape(
                seeds(&["http://typo.test", "http://popular.com"]),
                &["popular.com".to_string()],
            )
            .await;

        assert!(web.fetched().iter().all(|url| !url.contains("popular.com")));
        assert_eq!(report.successful.len(), 2);
    }

    #[tokio::test]
    async fn test_frontier_is_depth_first() {
        // Stack order: the last seed is dispatched first
        let web = Arc::new(
            FakeWeb::default()
                .page("http://first.test", 200, "")
                .page("http://last.test", 200, ""),
        );

        crawler(web.clone(), 10)
            .scrape(seeds(&["http://first.test", "http://last.test"]), &NO_EXCLUSIONS)
            .await;

        assert_eq!(web.fetched()[0], "http://last.test");
    }

    #[tokio::test]
    async fn test_empty_seeds() {
        let web = Arc::new(FakeWeb::default());
        let report = crawler(web, 10).scrape(Vec::new(), &NO_EXCLUSIONS).await;
        assert_eq!(report, CrawlReport::default());
    }

    #[tokio::test]
    async fn test_zero_time_limit_dispatches_nothing() {
        let web = Arc::new(FakeWeb::default().page("http://a.test", 200, ""));
        let config = CrawlConfig {
            time_limit: Some(Duration::ZERO),
            ..CrawlConfig::default()
        };

        let report = Crawler::new(config, web.clone(), Arc::new(HtmlLinkExtractor))
            .scrape(seeds(&["http://a.test"]), &NO_EXCLUSIONS)
            .await;

        assert!(report.visited.is_empty());
        assert!(web.fetched().is_empty());
    }

    // Panics on one URL, serves an empty page for every other
    struct PanickyWeb;

    #[async_trait]
    impl Fetcher for PanickyWeb {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            if url == "http://boom.test" {
                panic!("fetcher exploded");
            }
            Ok(FetchedPage {
                status: 200,
                body: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_worker_panic_does_not_hang_the_crawl() {
        let crawler = Crawler::new(
            CrawlConfig {
                workers: 2,
                target_successes: 10,
                poll_interval: Duration::from_millis(20),
                time_limit: None,
            },
            Arc::new(PanickyWeb),
            Arc::new(HtmlLinkExtractor),
        );

        let report = tokio::time::timeout(
            Duration::from_secs(3),
            crawler.scrape(seeds(&["http://ok.test", "http://boom.test"]), &NO_EXCLUSIONS),
        )
        .await
        .expect("crawl finished");

        assert_eq!(report.successful, HashSet::from(["http://ok.test".to_string()]));
        assert!(report.visited.contains("http://boom.test"));
    }

    // Takes `delay` before answering and records when it is done
    struct SlowPage {
        delay: Duration,
        done: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl Fetcher for SlowPage {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
            if url == "http://slow.test" {
                tokio::time::sleep(self.delay).await;
                self.done.store(true, std::sync::atomic::Ordering::SeqCst);
            }
            Ok(FetchedPage {
                status: 200,
                body: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_returns_after_in_flight_fetches_finish() {
        let web = Arc::new(SlowPage {
            delay: Duration::from_millis(300),
            done: std::sync::atomic::AtomicBool::new(false),
        });
        let crawler = Crawler::new(
            CrawlConfig {
                workers: 2,
                target_successes: 1,
                poll_interval: Duration::from_millis(20),
                time_limit: None,
            },
            web.clone(),
            Arc::new(HtmlLinkExtractor),
        );

        // slow.test is dispatched first (stack order), fast.test reaches the
        // target while slow.test is still loading
        let report = crawler
            .scrape(seeds(&["http://fast.test", "http://slow.test"]), &NO_EXCLUSIONS)
            .await;

        assert!(web.done.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(report.successful, HashSet::from(["http://fast.test".to_string()]));
        assert_eq!(report.visited.len(), 2);
    }
}
