//! Crawler coordinator - crawl orchestration
//!
//! This module ties the crawl together:
//! - Expanding configured seeds into crawl targets
//! - Running link discovery per seed and merging the results
//! - Fanning article extraction out over a bounded set of tasks
//! - Collecting articles as tasks complete, dropping per-URL failures

use crate::config::{Config, SeedEntry};
use crate::crawler::discover::{discover, CrawlTarget};
use crate::crawler::fetcher::build_http_client;
use crate::extract::{Article, Extractor};
use crate::PulseError;
use reqwest::Client;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    extractor: Arc<Extractor>,
    max_concurrent_fetches: usize,
}

impl Coordinator {
    /// Creates a coordinator from configuration
    ///
    /// Builds the shared HTTP client and the extractor over the built-in
    /// publisher registry.
    pub fn new(config: &Config) -> Result<Self, PulseError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        let extractor = Extractor::new(client.clone())?;

        Ok(Self::with_extractor(
            client,
            extractor,
            config.crawler.max_concurrent_fetches as usize,
        ))
    }

    /// Creates a coordinator around an existing client and extractor
    pub fn with_extractor(client: Client, extractor: Extractor, max_concurrent_fetches: usize) -> Self {
        Self {
            client,
            extractor: Arc::new(extractor),
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Runs discovery for every seed and merges the candidate URLs
    pub async fn discover_all(&self, seeds: &[CrawlTarget], company: &str) -> BTreeSet<String> {
        let mut links = BTreeSet::new();

        for seed in seeds {
            links.extend(discover(&self.client, seed, company).await);
        }

        links
    }

    /// Discovers and extracts every article about `company` reachable from `seeds`
    ///
    /// Articles come back in completion order. Per-URL failures are logged
    /// and skipped, so an empty list is a normal outcome.
    pub async fn crawl_all(&self, seeds: &[CrawlTarget], company: &str) -> Vec<Article> {
        let start_time = Instant::now();

        let links = self.discover_all(seeds, company).await;
        tracing::info!(
            "Discovered {} unique links across {} seeds",
            links.len(),
            seeds.len()
        );

        let articles = self.extract_all(links).await;

        tracing::info!(
            "Crawl completed: {} articles extracted in {:?}",
            articles.len(),
            start_time.elapsed()
        );

        articles
    }

    /// Extracts articles from `urls` concurrently
    ///
    /// At most `max_concurrent_fetches` tasks run at once; a permit is taken
    /// before each task is spawned. Dropping the returned future aborts
    /// the tasks still in flight.
    pub async fn extract_all(&self, urls: impl IntoIterator<Item = String>) -> Vec<Article> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut tasks = JoinSet::new();

        for url in urls {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let extractor = Arc::clone(&self.extractor);
            tasks.spawn(async move {
                let _permit = permit;
                let result = extractor.extract(&url).await;
                (url, result)
            });
        }

        let mut articles = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, Ok(article))) => {
                    tracing::debug!("Extracted '{}' from {}", article.title, url);
                    articles.push(article);
                }
                Ok((url, Err(e))) => {
                    tracing::warn!("Error processing article from {}: {}", url, e);
                }
                Err(e) => {
                    tracing::error!("Extraction task failed: {}", e);
                }
            }
        }

        articles
    }
}

/// Expands configured seeds into crawl targets
///
/// `{ticker}` and `{exchange}` placeholders are substituted. Seeds needing a
/// ticker are skipped when none is known.
pub fn expand_seeds(seeds: &[SeedEntry], ticker: Option<&str>, exchange: &str) -> Vec<CrawlTarget> {
    seeds
        .iter()
        .filter_map(|seed| {
            let url = seed.url.replace("{exchange}", exchange);

            let url = if url.contains("{ticker}") {
                match ticker {
                    Some(ticker) => url.replace("{ticker}", ticker),
                    None => {
                        tracing::warn!("Skipping seed {}: no ticker symbol known", seed.url);
                        return None;
                    }
                }
            } else {
                url
            };

            Some(CrawlTarget::new(url, seed.max_depth))
        })
        .collect()
}

/// Runs a complete crawl for one company
///
/// # Example
///
/// ```no_run
/// use market_pulse::config::load_config;
/// use market_pulse::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("pulse.toml"))?;
/// let articles = run_crawl(&config, "nvidia", Some("NVDA")).await?;
/// println!("{} articles", articles.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    company: &str,
    ticker: Option<&str>,
) -> Result<Vec<Article>, PulseError> {
    let coordinator = Coordinator::new(config)?;
    let seeds = expand_seeds(&config.seeds, ticker, &config.ticker.exchange);
    Ok(coordinator.crawl_all(&seeds, company).await)
}
