//! HTTP fetcher
//!
//! This module handles all HTTP requests for the pipeline, including:
//! - Building an HTTP client with browser-like headers
//! - GET requests with a per-attempt timeout
//! - Bounded retry with linear backoff, taken only on HTTP 429
//! - Error classification

mod pacer;

pub use pacer::Pacer;

use crate::config::FetcherConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Desktop-browser user agent; scraping targets routinely block obvious bots.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Errors that can occur while fetching a URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Builds the HTTP client used for every request in a discovery run
///
/// The client impersonates a desktop browser (user agent, accept headers) to
/// reduce anti-bot blocking, and applies the configured per-attempt timeout.
///
/// # Example
///
/// ```no_run
/// use pagemap::config::FetcherConfig;
/// use pagemap::fetch::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// # Retry Policy
///
/// Up to `max_attempts` total attempts. A retry is taken only when the server
/// answers HTTP 429; the wait before retry *i* is `i * retry_delay_ms`. Every
/// other failure (timeout, DNS, 4xx/5xx other than 429) propagates
/// immediately. This is deliberately narrower than retrying all 5xx:
/// scraping targets are untrusted third-party servers, and hammering them
/// during an outage only amplifies load.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The absolute URL to fetch
/// * `config` - Retry attempts and backoff base
pub async fn fetch_text(client: &Client, url: &str, config: &FetcherConfig) -> FetchResult<String> {
    for attempt in 1..=config.max_attempts {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS && attempt < config.max_attempts {
                    let wait = Duration::from_millis(config.retry_delay_ms * attempt as u64);
                    tracing::info!("Rate limited by {}, waiting {:?} before retry", url, wait);
                    tokio::time::sleep(wait).await;
                    continue;
                }

                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                return response.text().await.map_err(|e| classify_error(url, e));
            }
            Err(e) => return Err(classify_error(url, e)),
        }
    }

    // Loop always returns before falling through: the final attempt either
    // succeeds or takes one of the error arms.
    Err(FetchError::Status {
        url: url.to_string(),
        status: StatusCode::TOO_MANY_REQUESTS.as_u16(),
    })
}

/// Maps a reqwest error to the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
