//! Market-Pulse: company news crawler and digest builder
//!
//! This crate discovers news articles about a company from a small set of seed
//! pages, extracts them with publisher-specific rules, and turns them into a
//! sentiment-sorted digest.

pub mod config;
pub mod crawler;
pub mod digest;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Market-Pulse operations
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("No extraction rules registered")]
    NoExtractionRules,

    #[error("Invalid selector '{selector}' for {publisher}: {message}")]
    InvalidSelector {
        publisher: String,
        selector: String,
        message: String,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Ticker lookup failed for '{company}': {message}")]
    TickerLookup { company: String, message: String },

    #[error("Summarization failed: {0}")]
    Summarize(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// A page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unreadable body from {url}: {message}")]
    Body { url: String, message: String },
}

/// A fetched page did not match its publisher's extraction rule
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No extraction rule for {url}")]
    UnrecognizedPublisher { url: String },

    #[error("Missing {element} in {url}")]
    MissingElement { url: String, element: &'static str },

    #[error("Date '{raw}' from {url} does not match '{format}'")]
    DateFormat {
        url: String,
        raw: String,
        format: &'static str,
    },
}

/// Result type alias for Market-Pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{discover, Coordinator, CrawlTarget};
pub use extract::{Article, Extractor};
pub use url::{author_from_url, registrable_domain};
