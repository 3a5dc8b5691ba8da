//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with user agent and timeouts
//! - GET requests with standard redirect following
//! - Error classification (status, timeout, network, body)

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request ran past its deadline
        timed_out: bool,
    },

    /// Headers arrived but the body could not be read or decoded
    BodyError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Converts the outcome into the fetched body, or a typed failure for `url`
    pub fn into_body(self, url: &str) -> Result<String, FetchError> {
        match self {
            FetchResult::Success { final_url, body } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                Ok(body)
            }
            FetchResult::HttpError { status_code } => Err(FetchError::Status {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError { timed_out: true, .. } => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            FetchResult::NetworkError { error, .. } => Err(FetchError::Network {
                url: url.to_string(),
                message: error,
            }),
            FetchResult::BodyError { error } => Err(FetchError::Body {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Formats the crawler's user agent string
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds the HTTP client shared by link discovery and extraction
///
/// The per-request timeout bounds how long one slow publisher can hold a
/// worker; a timeout is reported like any other fetch failure.
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// No retries: a failed fetch is reported once and the caller moves on.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    tracing::debug!("Fetching {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) if e.is_timeout() => classify_error(e),
        Err(e) => FetchResult::BodyError {
            error: e.to_string(),
        },
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            timed_out: true,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: "Connection refused".to_string(),
            timed_out: false,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            timed_out: false,
        }
    }
}
