//! Company name to ticker symbol lookup

use crate::config::{CrawlerConfig, TickerConfig};
use crate::PulseError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Resolves a company name to its ticker symbol
#[async_trait]
pub trait TickerLookup: Send + Sync {
    async fn lookup(&self, company: &str) -> Result<String, PulseError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    symbol: String,
}

/// Ticker lookup against the Yahoo Finance search endpoint
///
/// The endpoint answers bots with an error page, so requests carry the
/// configured browser user agent.
pub struct YahooTickerLookup {
    client: Client,
    search_url: String,
}

impl YahooTickerLookup {
    /// Builds the lookup client, sharing the crawler's timeouts
    pub fn new(config: &TickerConfig, crawler: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(config.browser_user_agent.clone())
            .timeout(Duration::from_secs(crawler.request_timeout_secs))
            .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait]
impl TickerLookup for YahooTickerLookup {
    async fn lookup(&self, company: &str) -> Result<String, PulseError> {
        let lookup_error = |message: String| PulseError::TickerLookup {
            company: company.to_string(),
            message,
        };

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("q", company),
                ("quotesCount", "1"),
                ("newsCount", "0"),
                ("region", "US"),
            ])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| lookup_error(e.to_string()))?;

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        let symbol = search
            .quotes
            .into_iter()
            .next()
            .map(|quote| quote.symbol)
            .ok_or_else(|| lookup_error("no quotes returned".to_string()))?;

        tracing::info!("Resolved '{}' to ticker {}", company, symbol);
        Ok(symbol)
    }
}
