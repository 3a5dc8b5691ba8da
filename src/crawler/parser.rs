//! HTML link extraction for company news discovery
//!
//! This module selects the anchors on a page that point at articles about a
//! company and resolves them to absolute URLs.

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Substrings marking share widgets, auth flows, and navigation chrome
pub const DENYLIST: &[&str] = &[
    "reddit", "facebook", "whatsapp", "twitter", "linkedin", "mailto", "checkout", "login",
    "create", "forgot",
];

/// Builds the link-target pattern for a company
///
/// The company may be wrapped in hyphens (`/news/nvidia-beats-estimates`);
/// the match is a case-sensitive substring search over the raw `href`.
pub fn company_pattern(company: &str) -> Regex {
    // An escaped literal always compiles
    Regex::new(&format!("-*{}-*", regex::escape(company))).expect("escaped pattern is valid")
}

/// Returns true if the link points at a denylisted destination
pub fn is_denied(link: &str) -> bool {
    DENYLIST.iter().any(|needle| link.contains(needle))
}

/// Extracts the links on a page whose target matches `pattern`
///
/// Matching and the denylist check are done on the raw `href` attribute;
/// surviving links are then resolved against `base_url`. Order of first appearance is kept and
/// duplicates are left for the caller to remove.
///
/// # Example
///
/// ```
/// use market_pulse::crawler::{company_pattern, extract_company_links};
/// use url::Url;
///
/// let html = r#"<a href="/news/nvidia-earnings">Earnings</a><a href="/about">About</a>"#;
/// let base = Url::parse("https://finance.yahoo.com/").unwrap();
/// let links = extract_company_links(html, &base, &company_pattern("nvidia"));
/// assert_eq!(links, vec!["https://finance.yahoo.com/news/nvidia-earnings"]);
/// ```
pub fn extract_company_links(html: &str, base_url: &Url, pattern: &Regex) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if !pattern.is_match(href) || is_denied(href) {
                continue;
            }

            if let Some(absolute_url) = resolve_link(href, base_url) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for javascript:, tel:, data: and fragment-only links, and
/// for anything that is not HTTP(S) after resolution.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("tel:") || href.starts_with("data:") {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
