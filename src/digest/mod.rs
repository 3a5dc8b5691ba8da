//! Digest building
//!
//! Turns crawled articles into a digest: each article is summarized and
//! scored, then the entries are sorted by sentiment (most positive first)
//! and truncated to the configured limit.

mod sentiment;
mod summarize;
mod ticker;

pub use sentiment::{LexiconScorer, SentimentScorer};
pub use summarize::{LeadSummarizer, Summarizer};
pub use ticker::{TickerLookup, YahooTickerLookup};

use crate::extract::Article;
use serde::{Deserialize, Serialize};

/// One summarized, scored article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestEntry {
    pub author: String,
    pub title: String,
    pub ticker: Option<String>,

    /// Summary text with `$` escaped for Markdown rendering
    pub summary: String,

    /// Compound sentiment in [-1, 1]
    pub sentiment: f64,

    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// Builds a digest from crawled articles
///
/// Articles without body text are skipped, as are articles whose summary
/// fails; neither aborts the digest.
pub async fn build_digest(
    articles: Vec<Article>,
    ticker: Option<&str>,
    summarizer: &dyn Summarizer,
    scorer: &dyn SentimentScorer,
    limit: usize,
) -> Vec<DigestEntry> {
    let mut entries = Vec::with_capacity(articles.len());

    for article in articles {
        if article.content.trim().is_empty() {
            tracing::debug!("Skipping '{}': no body text", article.title);
            continue;
        }

        let summary = match summarizer.summarize(&article.content).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Could not summarize '{}': {}", article.title, e);
                continue;
            }
        };

        let sentiment = scorer.score(&summary);
        entries.push(DigestEntry {
            author: article.author,
            title: article.title,
            ticker: ticker.map(str::to_string),
            summary: summary.replace('$', "\\$"),
            sentiment,
            published_at: article.published_at,
        });
    }

    // Stable, so equal scores keep crawl order
    entries.sort_by(|a, b| b.sentiment.total_cmp(&a.sentiment));
    entries.truncate(limit);

    tracing::info!("Digest holds {} entries", entries.len());
    entries
}
