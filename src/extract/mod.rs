//! Article extraction
//!
//! Turns a fetched article page into an [`Article`] using the extraction
//! rule registered for the page's publisher.

mod date;
mod rules;

pub use date::{DateFormat, CANONICAL_FORMAT};
pub use rules::{default_rules, ExtractionRule, GENERIC_TITLE_SELECTOR};

use crate::crawler::fetch_url;
use crate::url::author_from_url;
use crate::{ExtractError, PulseError};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// A news article extracted from a publisher page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    /// Title-cased publisher name derived from the URL
    pub author: String,

    /// `YYYY-MM-DD HH:MM`
    #[serde(rename = "publishedAt")]
    pub published_at: String,

    /// Paragraph text joined by single spaces
    pub content: String,
}

/// An extraction rule with its selectors parsed
struct CompiledRule {
    rule: ExtractionRule,
    title: Selector,
    date: Selector,
    body: Selector,
    paragraph: Selector,
}

impl CompiledRule {
    fn compile(rule: ExtractionRule) -> Result<Self, PulseError> {
        Ok(Self {
            title: parse_selector(&rule, rule.title_selector())?,
            date: parse_selector(&rule, rule.date)?,
            body: parse_selector(&rule, rule.body)?,
            paragraph: parse_selector(&rule, "p")?,
            rule,
        })
    }
}

fn parse_selector(rule: &ExtractionRule, selector: &str) -> Result<Selector, PulseError> {
    Selector::parse(selector).map_err(|e| PulseError::InvalidSelector {
        publisher: rule.publisher.to_string(),
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

/// Fetches article pages and extracts them with publisher rules
pub struct Extractor {
    client: Client,
    rules: Vec<CompiledRule>,
}

impl Extractor {
    /// Creates an extractor over the built-in publisher registry
    pub fn new(client: Client) -> Result<Self, PulseError> {
        Self::with_rules(client, default_rules())
    }

    /// Creates an extractor over a custom registry
    ///
    /// An empty registry or an unparsable selector is a setup error.
    pub fn with_rules(client: Client, rules: Vec<ExtractionRule>) -> Result<Self, PulseError> {
        if rules.is_empty() {
            return Err(PulseError::NoExtractionRules);
        }

        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { client, rules })
    }

    /// Returns the publisher key of the rule that applies to `url`
    pub fn publisher_for(&self, url: &str) -> Option<&'static str> {
        self.rule_for(url).map(|compiled| compiled.rule.publisher)
    }

    fn rule_for(&self, url: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|compiled| compiled.rule.matches(url))
    }

    /// Fetches `url` and extracts its article
    ///
    /// Unknown publishers are rejected before any request is made.
    pub async fn extract(&self, url: &str) -> Result<Article, PulseError> {
        if self.rule_for(url).is_none() {
            return Err(ExtractError::UnrecognizedPublisher {
                url: url.to_string(),
            }
            .into());
        }

        let body = fetch_url(&self.client, url).await.into_body(url)?;
        self.extract_from_html(url, &body)
    }

    /// Extracts an article from already-fetched markup
    pub fn extract_from_html(&self, url: &str, html: &str) -> Result<Article, PulseError> {
        let compiled = self
            .rule_for(url)
            .ok_or_else(|| ExtractError::UnrecognizedPublisher {
                url: url.to_string(),
            })?;
        let author = author_from_url(&Url::parse(url)?);

        let document = Html::parse_document(html);
        let missing = |element: &'static str| ExtractError::MissingElement {
            url: url.to_string(),
            element,
        };

        let title = document
            .select(&compiled.title)
            .next()
            .ok_or_else(|| missing("title"))?
            .text()
            .collect::<String>()
            .replace('\n', "")
            .trim()
            .to_string();

        let raw_date = document
            .select(&compiled.date)
            .next()
            .ok_or_else(|| missing("publication date"))?
            .text()
            .collect::<String>();
        let cleaned = (compiled.rule.clean_date)(&raw_date);
        let published_at =
            compiled
                .rule
                .date_format
                .normalize(&cleaned)
                .ok_or_else(|| ExtractError::DateFormat {
                    url: url.to_string(),
                    raw: cleaned.clone(),
                    format: compiled.rule.date_format.pattern(),
                })?;

        let container = document
            .select(&compiled.body)
            .next()
            .ok_or_else(|| missing("body container"))?;
        let content = container
            .select(&compiled.paragraph)
            .map(|p| p.text().collect::<String>())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Article {
            title,
            author,
            published_at,
            content,
        })
    }
}
