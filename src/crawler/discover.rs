//! Recursive, depth-bounded discovery of company article links
//!
//! Discovery walks one seed depth-first and sequentially. The depth budget
//! is small (0 or 1 in practice), so the walk keeps no visited set across
//! the call tree: a URL reachable from two pages at the same level is
//! fetched once per parent. Only the returned set is de-duplicated.

use crate::crawler::fetcher::fetch_url;
use crate::crawler::parser::{company_pattern, extract_company_links};
use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use reqwest::Client;
use std::collections::BTreeSet;
use url::Url;

/// A seed page paired with its own recursion limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub max_depth: u32,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            url: url.into(),
            max_depth,
        }
    }
}

/// Discovers candidate article URLs about `company` starting from a seed
///
/// Failures never propagate: an unreachable page contributes nothing to the
/// result, and a page with no matching links is a valid empty outcome.
pub async fn discover(client: &Client, target: &CrawlTarget, company: &str) -> BTreeSet<String> {
    let pattern = company_pattern(company);
    let links = discover_from(client, &target.url, &pattern, target.max_depth, 0).await;

    tracing::info!(
        "Discovered {} candidate links from {} (max depth {})",
        links.len(),
        target.url,
        target.max_depth
    );

    links
}

/// Collects matching links on `url` and, below `max_depth`, on every page
/// they point to
pub fn discover_from<'a>(
    client: &'a Client,
    url: &'a str,
    pattern: &'a Regex,
    max_depth: u32,
    current_depth: u32,
) -> BoxFuture<'a, BTreeSet<String>> {
    async move {
        tracing::debug!("Scraping {} at depth {}", url, current_depth);

        let body = match fetch_url(client, url).await.into_body(url) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                return BTreeSet::new();
            }
        };

        let base_url = match Url::parse(url) {
            Ok(base_url) => base_url,
            Err(e) => {
                tracing::warn!("Cannot resolve links on {}: {}", url, e);
                return BTreeSet::new();
            }
        };

        let filtered: BTreeSet<String> = extract_company_links(&body, &base_url, pattern)
            .into_iter()
            .collect();

        if current_depth >= max_depth {
            return filtered;
        }

        let mut discovered = filtered.clone();
        for link in &filtered {
            let nested = discover_from(client, link, pattern, max_depth, current_depth + 1).await;
            discovered.extend(nested);
        }

        discovered
    }
    .boxed()
}
