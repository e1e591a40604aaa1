// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - A `Fetcher` trait so the crawler does not depend on reqwest directly
// - `HttpFetcher`: the real implementation, a shared reqwest Client
// - Categorizes transport failures (timeout, DNS, redirects, ...) into
//   a typed `FetchError`
//
// Note: a non-200 status is NOT an error here. The fetcher reports what
// the server said; the crawler decides what counts as success.
//
// Rust concepts:
// - async-trait: lets a trait have async methods and still be used as
//   `Arc<dyn Fetcher>`
// - thiserror: derives std::error::Error + Display for our error enum
// - From<T>: lets `?` convert a reqwest::Error into a FetchError
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

// A downloaded page: the HTTP status and the raw, undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Why a request never produced a response we could read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Could not connect (DNS failure, refused, unreachable, ...)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Too many redirects (redirect loop)
    #[error("too many redirects")]
    TooManyRedirects,
    /// Headers arrived but the body could not be read or decoded
    #[error("could not read response body: {0}")]
    Body(String),
    /// Anything else reqwest can report
    #[error("{0}")]
    Other(String),
}

// Categorizes the different reasons a reqwest call can fail
impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

/// Turns a URL into a status code and raw bytes.
///
/// Implementations must be shareable across worker tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

// The real fetcher, backed by one reqwest Client
//
// Client is cheap to clone (it's reference counted internally) and keeps a
// connection pool, so every worker shares the same one.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("typo-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        // Reading the body can still fail half-way (connection reset,
        // bad content-encoding), so that gets its own category
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Timeout.to_string(), "request timed out");
        assert_eq!(
            FetchError::Connect("dns error".to_string()).to_string(),
            "connection failed: dns error"
        );
        assert_eq!(FetchError::Other("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        // Port 9 (discard) on localhost is almost never listening
        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }
}
