//! Sentiment scoring seam

use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores text sentiment in [-1, 1]
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// VADER compound-score scorer
///
/// The compound score sums the valence of every lexicon word, adjusted for
/// negation, boosters, capitalization and punctuation, and normalizes the
/// total into [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        // The analyzer only borrows the shared lexicon tables
        let analyzer = SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}
