//! Markdown rendering of digests
//!
//! Summaries already carry escaped `$` signs, so the text can be dropped
//! into any Markdown renderer as-is.

use crate::digest::DigestEntry;

/// Formats digest entries as a Markdown document
pub fn format_digest_markdown(company: &str, entries: &[&DigestEntry]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {} News Digest\n\n", company));

    if entries.is_empty() {
        md.push_str("No articles found.\n");
        return md;
    }

    for entry in entries {
        md.push_str(&format!("## {}\n\n", entry.title));

        let mut byline = format!("- **Source**: {}\n", entry.author);
        if let Some(ticker) = &entry.ticker {
            byline.push_str(&format!("- **Ticker**: {}\n", ticker));
        }
        byline.push_str(&format!("- **Published**: {}\n", entry.published_at));
        byline.push_str(&format!("- **Sentiment**: {:.3}\n\n", entry.sentiment));
        md.push_str(&byline);

        md.push_str(&entry.summary);
        md.push_str("\n\n");
    }

    md
}
