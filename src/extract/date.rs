//! Publication date cleanup and normalization
//!
//! Every publisher prints dates differently. Each rule pairs a cleanup
//! function (drop labels, punctuation, ordinal suffixes) with a chrono
//! format; the parsed value is always re-emitted as `YYYY-MM-DD HH:MM`.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Output format shared by every publisher
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M";

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)(th|nd|rd|st)").unwrap());
static NYPOST_STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z]+ \d{1,2}, \d{4}, \d{1,2}:\d{2} [ap]m ET").unwrap()
});
static CNN_STAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}:\d{2} [AaPp][Mm] EDT, [A-Za-z]{3} [A-Za-z]+ \d{1,2}, \d{4}").unwrap()
});
static LEADING_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Published|Updated)\s*").unwrap());

/// How the cleaned date text is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Date and time of day
    DateTime(&'static str),
    /// Calendar date only; normalized to midnight
    Date(&'static str),
}

impl DateFormat {
    /// The chrono format string
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DateTime(pattern) | DateFormat::Date(pattern) => pattern,
        }
    }

    /// Parses cleaned text, returning None on mismatch
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        match self {
            DateFormat::DateTime(pattern) => NaiveDateTime::parse_from_str(text, pattern).ok(),
            DateFormat::Date(pattern) => NaiveDate::parse_from_str(text, pattern)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0)),
        }
    }

    /// Parses cleaned text and renders it in [`CANONICAL_FORMAT`]
    pub fn normalize(&self, text: &str) -> Option<String> {
        self.parse(text)
            .map(|parsed| parsed.format(CANONICAL_FORMAT).to_string())
    }
}

/// Surrounding whitespace only
pub fn clean_trim(raw: &str) -> String {
    raw.trim().to_string()
}

/// Drops periods from abbreviations such as `p.m.` and `Jun.`
pub fn clean_periods(raw: &str) -> String {
    raw.replace('.', "").trim().to_string()
}

/// Drops ordinal suffixes: `Jun 5th 2024` → `Jun 5 2024`
pub fn clean_ordinals(raw: &str) -> String {
    ORDINAL_RE.replace_all(raw.trim(), "$1").into_owned()
}

/// Drops a leading `Published`/`Updated` label
pub fn clean_leading_label(raw: &str) -> String {
    LEADING_LABEL_RE.replace(raw.trim(), "").trim().to_string()
}

/// Keeps the last `June 5, 2024, 2:23 pm ET` stamp of a byline block
///
/// The byline carries both the published and the updated stamp; the
/// updated one comes last.
pub fn clean_nypost(raw: &str) -> String {
    let flattened = raw.replace('\n', "").replace('.', "");
    last_match(&NYPOST_STAMP_RE, &flattened)
}

/// Keeps the trailing `2:23 PM EDT, Wed June 5, 2024` stamp of a timestamp block
pub fn clean_cnn(raw: &str) -> String {
    last_match(&CNN_STAMP_RE, raw)
}

fn last_match(re: &Regex, text: &str) -> String {
    re.find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| text.trim().to_string())
}
