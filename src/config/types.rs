use serde::Deserialize;

/// Default Yahoo latest-news listing, followed one level deep
pub const DEFAULT_NEWS_SEED: &str = "https://finance.yahoo.com/topic/latest-news/";

/// Default Google Finance quote page for the company's ticker
pub const DEFAULT_QUOTE_SEED: &str = "https://www.google.com/finance/quote/{ticker}:{exchange}";

/// Main configuration structure for Market-Pulse
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_seeds")]
    pub seeds: Vec<SeedEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of article fetches in flight at once
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_concurrency(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Ticker symbol lookup configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TickerConfig {
    /// Search endpoint returning `{"quotes": [{"symbol": ...}]}`
    #[serde(rename = "search-url", default = "default_search_url")]
    pub search_url: String,

    /// The search endpoint rejects non-browser user agents
    #[serde(rename = "browser-user-agent", default = "default_browser_user_agent")]
    pub browser_user_agent: String,

    /// Exchange substituted for `{exchange}` in seed URLs
    #[serde(default = "default_exchange")]
    pub exchange: String,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            browser_user_agent: default_browser_user_agent(),
            exchange: default_exchange(),
        }
    }
}

/// Digest building configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    /// Maximum number of entries kept in a digest
    #[serde(rename = "article-limit", default = "default_article_limit")]
    pub article_limit: usize,

    /// Sentences kept by the built-in extractive summarizer
    #[serde(rename = "summary-sentences", default = "default_summary_sentences")]
    pub summary_sentences: usize,

    /// Minimum sentiment for an entry to be shown by `--show`
    #[serde(rename = "relevance-threshold", default = "default_relevance_threshold")]
    pub relevance_threshold: f64,

    /// Maximum number of entries shown by `--show`
    #[serde(rename = "show-limit", default = "default_show_limit")]
    pub show_limit: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            article_limit: default_article_limit(),
            summary_sentences: default_summary_sentences(),
            relevance_threshold: default_relevance_threshold(),
            show_limit: default_show_limit(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving digest JSON files
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// A seed page with its own recursion budget
///
/// The URL may contain `{ticker}` and `{exchange}` placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub url: String,

    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

fn default_concurrency() -> u32 {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    // I/O bound, so oversubscribe the cores
    (cores * 4).min(64) as u32
}

fn default_request_timeout() -> u64 {
    20
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_search_url() -> String {
    "https://query2.finance.yahoo.com/v1/finance/search".to_string()
}

fn default_browser_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/114.0.0.0 Safari/537.36"
        .to_string()
}

fn default_exchange() -> String {
    "NASDAQ".to_string()
}

fn default_article_limit() -> usize {
    10
}

fn default_summary_sentences() -> usize {
    3
}

fn default_relevance_threshold() -> f64 {
    0.5
}

fn default_show_limit() -> usize {
    5
}

fn default_output_directory() -> String {
    "./digests".to_string()
}

fn default_seeds() -> Vec<SeedEntry> {
    vec![
        SeedEntry {
            url: DEFAULT_NEWS_SEED.to_string(),
            max_depth: 1,
        },
        SeedEntry {
            url: DEFAULT_QUOTE_SEED.to_string(),
            max_depth: 0,
        },
    ]
}
