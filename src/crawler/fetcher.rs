//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pipeline:
//! - Building HTTP clients with a browser user agent and bounded timeouts
//! - A randomized courtesy pause before every request after the first
//! - GET requests to fetch page content, single attempt, no retries
//! - Error classification into [`FetchCause`]

use crate::config::FetcherConfig;
use crate::{FetchCause, FetchError};
use rand::Rng;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use blog_lens::config::FetcherConfig;
/// use blog_lens::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Sequential page fetcher with a per-request courtesy delay
///
/// The delay applies to every outbound request except the very first one
/// issued by this fetcher, regardless of which company the request is for.
pub struct Fetcher {
    client: Client,
    min_delay: Duration,
    max_delay: Duration,
    requests_issued: u64,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(
            client,
            Duration::from_millis(config.min_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        ))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            client,
            min_delay,
            max_delay: max_delay.max(min_delay),
            requests_issued: 0,
        }
    }

    /// Number of requests issued so far
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Fetches a URL and returns its body as text
    ///
    /// # Error Classification
    ///
    /// | Condition | Cause |
    /// |-----------|-------|
    /// | Non-2xx status | `Status(code)` |
    /// | Connect or read timeout | `Timeout` |
    /// | Connection refused, DNS, TLS | `Connect` |
    /// | Body not decodable | `Body` |
    /// | Anything else | `Request` |
    ///
    /// Failures are never retried here.
    pub async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        if self.requests_issued > 0 {
            let pause = self.next_delay();
            if !pause.is_zero() {
                tracing::trace!(%url, delay_ms = pause.as_millis() as u64, "Courtesy delay");
                tokio::time::sleep(pause).await;
            }
        }
        self.requests_issued += 1;

        tracing::debug!(%url, "Fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                url: url.to_string(),
                cause: FetchCause::Status(status.as_u16()),
            });
        }

        response.text().await.map_err(|e| FetchError {
            url: url.to_string(),
            cause: FetchCause::Body(e.to_string()),
        })
    }

    /// Draws a uniformly random pause within the configured bounds
    fn next_delay(&self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        if min == max {
            return self.min_delay;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

/// Maps a reqwest error onto a fetch failure cause
fn classify_error(url: &str, error: &reqwest::Error) -> FetchError {
    let cause = if error.is_timeout() {
        FetchCause::Timeout
    } else if error.is_connect() {
        FetchCause::Connect(error.to_string())
    } else {
        FetchCause::Request(error.to_string())
    };

    FetchError {
        url: url.to_string(),
        cause,
    }
}
