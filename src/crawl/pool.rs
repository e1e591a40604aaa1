// src/crawl/pool.rs
// =============================================================================
// A fixed-size pool of fetch workers.
//
// How it works:
// 1. `spawn` starts N tokio tasks that all read from one job channel
// 2. `submit` puts a URL on the job channel (never blocks)
// 3. Each worker fetches the page, extracts + resolves its links, and sends
//    (url, FetchOutcome) back on the results channel
// 4. `poll` waits a bounded time for results and hands back what arrived
// 5. `shutdown` closes the job channel and waits for every worker to finish
//    whatever is still queued or running
//
// A panic inside a fetcher or extractor is caught and reported as a failed
// fetch, so every submitted URL gets exactly one result.
//
// Workers never touch the crawl state. Everything they learn travels back
// through the results channel.
// =============================================================================

use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

use super::resolve::resolve;
use crate::fetch::{FetchError, Fetcher, LinkExtractor};

// The only status code counted as a successful page
const SUCCESS_STATUS: u16 = 200;

/// Why a dispatched URL did not count as a success
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchFailure {
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// The result of one fetch-and-extract task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page loaded; holds every resolved link found on it
    Success(HashSet<String>),
    Failure(FetchFailure),
}

// Fetches one page and turns it into an outcome
//
// Hrefs that resolve to "ignore" (same-page anchors) are dropped here.
pub async fn fetch_and_extract(
    fetcher: &dyn Fetcher,
    extractor: &dyn LinkExtractor,
    url: &str,
) -> FetchOutcome {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => return FetchOutcome::Failure(e.into()),
    };

    if page.status != SUCCESS_STATUS {
        return FetchOutcome::Failure(FetchFailure::Status(page.status));
    }

    let links = extractor
        .extract_hrefs(&page.body)
        .iter()
        .filter_map(|href| resolve(url, href))
        .collect();

    FetchOutcome::Success(links)
}

// Same as `fetch_and_extract`, but a panic becomes a failed outcome
async fn fetch_and_extract_guarded(
    fetcher: &dyn Fetcher,
    extractor: &dyn LinkExtractor,
    url: &str,
) -> FetchOutcome {
    AssertUnwindSafe(fetch_and_extract(fetcher, extractor, url))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            warn!("fetching {} panicked", url);
            FetchOutcome::Failure(FetchFailure::Panicked(panic_message(&*panic)))
        })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub struct WorkerPool {
    jobs: mpsc::UnboundedSender<String>,
    results: mpsc::UnboundedReceiver<(String, FetchOutcome)>,
    workers: Vec<JoinHandle<()>>,
    closed: bool,
}

impl WorkerPool {
    /// Starts `size` workers (at least one).
    pub fn spawn(
        size: usize,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Self {
        let (jobs, job_rx) = mpsc::unbounded_channel::<String>();
        let (result_tx, results) = mpsc::unbounded_channel();

        // Every worker pulls from the same receiver, one at a time
        let job_rx = Arc::new(Mutex::new(job_rx));

        let workers = (0..size.max(1))
            .map(|_| {
                let job_rx = Arc::clone(&job_rx);
                let result_tx = result_tx.clone();
                let fetcher = Arc::clone(&fetcher);
                let extractor = Arc::clone(&extractor);

                tokio::spawn(async move {
                    loop {
                        // The lock is released as soon as a job is taken
                        let next = job_rx.lock().await.recv().await;
                        let Some(url) = next else { break };

                        let outcome = fetch_and_extract_guarded(&*fetcher, &*extractor, &url).await;
                        if result_tx.send((url, outcome)).is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();

        Self {
            jobs,
            results,
            workers,
            closed: false,
        }
    }

    /// True once every worker has exited; no further results will arrive.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Queues a URL for fetching.
    pub fn submit(&self, url: String) {
        // Only fails if every worker is gone, which only a panic can cause
        if let Err(e) = self.jobs.send(url) {
            warn!("worker pool is closed, dropping {}", e.0);
        }
    }

    /// Waits up to `wait` for the first finished task, then collects every
    /// other result that is already available without waiting further.
    pub async fn poll(&mut self, wait: Duration) -> Vec<(String, FetchOutcome)> {
        let mut finished = Vec::new();

        match tokio::time::timeout(wait, self.results.recv()).await {
            Ok(Some(first)) => {
                finished.push(first);
                while let Ok(next) = self.results.try_recv() {
                    finished.push(next);
                }
            }
            // Every sender is gone, so every worker has exited
            Ok(None) => self.closed = true,
            Err(_) => {}
        }

        finished
    }

    /// Closes the job queue and waits until every queued and running task
    /// has finished. Their results are discarded.
    pub async fn shutdown(self) {
        let WorkerPool {
            jobs,
            results,
            workers,
            ..
        } = self;

        drop(jobs);

        for joined in join_all(workers).await {
            if let Err(e) = joined {
                warn!("crawl worker panicked: {}", e);
            }
        }

        drop(results);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an mpsc channel?
//    - "multi-producer, single-consumer": many senders, one receiver
//    - unbounded_channel() never makes the sender wait
//    - recv() returns None once every sender has been dropped
//
// 2. Why is the job receiver behind Arc<Mutex<...>>?
//    - A receiver can't be cloned, but every worker needs to read from it
//    - The Mutex lets exactly one worker take the next job at a time
//    - tokio's Mutex can be held across .await, std's can't
//
// 3. What does tokio::time::timeout do?
//    - Runs a future, but gives up after the given Duration
//    - Returns Err(Elapsed) on timeout, Ok(value) otherwise
//
// 4. What is join_all?
//    - Turns a Vec of futures (here: JoinHandles) into one future
//    - It finishes when all of them have finished
// -----------------------------------------------------------------------------
