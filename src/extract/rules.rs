//! Publisher extraction rules
//!
//! Rules are matched by domain substring in registry order; the first
//! match wins. Adding a publisher means adding one entry to
//! [`default_rules`].

use crate::extract::date::{
    clean_cnn, clean_leading_label, clean_nypost, clean_ordinals, clean_periods, clean_trim,
    DateFormat,
};

/// Title selector used when a rule does not name its own
pub const GENERIC_TITLE_SELECTOR: &str = "h1";

/// Where to find an article's parts on one publisher's pages
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    /// Substring identifying the publisher in a URL
    pub publisher: &'static str,

    /// Title element; `None` falls back to [`GENERIC_TITLE_SELECTOR`]
    pub title: Option<&'static str>,

    /// Element holding the publication date
    pub date: &'static str,

    /// Normalizes the raw date text before parsing
    pub clean_date: fn(&str) -> String,

    /// Format of the cleaned date text
    pub date_format: DateFormat,

    /// Container whose `p` elements form the article body
    pub body: &'static str,
}

impl ExtractionRule {
    /// Returns true if this rule applies to `url`
    pub fn matches(&self, url: &str) -> bool {
        url.contains(self.publisher)
    }

    /// The effective title selector
    pub fn title_selector(&self) -> &'static str {
        self.title.unwrap_or(GENERIC_TITLE_SELECTOR)
    }
}

/// The built-in publisher registry, in matching order
pub fn default_rules() -> Vec<ExtractionRule> {
    vec![
        ExtractionRule {
            publisher: "yahoo",
            title: Some("h1#caas-lead-header-undefined"),
            date: "time",
            clean_date: clean_trim,
            date_format: DateFormat::DateTime("%a, %b %d, %Y, %I:%M %p"),
            body: "div.caas-body",
        },
        ExtractionRule {
            publisher: "washingtonpost",
            title: Some(r#"span[data-qa="headline-opinion-text"]"#),
            date: r#"span[data-testid="display-date"]"#,
            clean_date: clean_periods,
            date_format: DateFormat::DateTime("%B %d, %Y at %I:%M %p EDT"),
            body: "div.meteredContent.grid-center",
        },
        ExtractionRule {
            publisher: "nypost",
            title: None,
            date: "div.date.meta.meta--byline.date--updated",
            clean_date: clean_nypost,
            date_format: DateFormat::DateTime("%B %d, %Y, %I:%M %p ET"),
            body: "div.single__content.entry-content.m-bottom",
        },
        ExtractionRule {
            publisher: "businessinsider",
            title: None,
            date: "time",
            clean_date: clean_trim,
            date_format: DateFormat::DateTime("%Y-%m-%dT%H:%M:%SZ"),
            body: "div.content-lock-content",
        },
        ExtractionRule {
            publisher: "cnn",
            title: None,
            date: "div.timestamp",
            clean_date: clean_cnn,
            date_format: DateFormat::DateTime("%I:%M %p EDT, %a %B %d, %Y"),
            body: "div.article__content",
        },
        ExtractionRule {
            publisher: "pcworld",
            title: None,
            date: "span.posted-on",
            clean_date: clean_trim,
            date_format: DateFormat::DateTime("%b %d, %Y %I:%M %p PDT"),
            body: "div#link_wrapped_content",
        },
        ExtractionRule {
            publisher: "economist",
            title: None,
            date: "time",
            clean_date: clean_ordinals,
            date_format: DateFormat::Date("%b %d %Y"),
            body: "div.css-1x0aq03.e13topc92",
        },
        ExtractionRule {
            publisher: "foxbusiness",
            title: None,
            date: "time",
            clean_date: clean_trim,
            date_format: DateFormat::DateTime("%B %d, %Y %I:%M%p EDT"),
            body: "div.article-body",
        },
        ExtractionRule {
            publisher: "cnbc",
            title: None,
            date: "time",
            clean_date: clean_leading_label,
            date_format: DateFormat::DateTime("%a, %b %d %Y%I:%M %p EDT"),
            body: "div.ArticleBody-articleBody",
        },
    ]
}
