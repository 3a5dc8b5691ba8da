//! Article summarization seam

use crate::PulseError;
use async_trait::async_trait;

/// Condenses article text into a short summary
///
/// A language-model client plugs in here; [`LeadSummarizer`] is the
/// built-in offline implementation.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, PulseError>;
}

/// Extractive summarizer keeping the first sentences of an article
#[derive(Debug, Clone)]
pub struct LeadSummarizer {
    max_sentences: usize,
}

impl LeadSummarizer {
    pub fn new(max_sentences: usize) -> Self {
        Self {
            max_sentences: max_sentences.max(1),
        }
    }
}

#[async_trait]
impl Summarizer for LeadSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, PulseError> {
        Ok(split_sentences(text)
            .into_iter()
            .take(self.max_sentences)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

/// Splits text after `.`, `!` or `?` followed by whitespace
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
        if at_boundary {
            let end = index + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}
