//! Text analysis for extracted posts
//!
//! The [`Analyzer`] is a pure function of a post's `content_text`: the same
//! text always produces the same [`AnalysisResult`], and degenerate input
//! yields zeroed fields instead of an error.
//!
//! # Example
//!
//! ```
//! use blog_lens::analysis::Analyzer;
//! use blog_lens::config::AnalysisConfig;
//! use blog_lens::{Complexity, Tone};
//!
//! let analyzer = Analyzer::from_config(&AnalysisConfig::default()).unwrap();
//! let result = analyzer.analyze("The cat sat on the mat. It was happy.");
//! assert_eq!(result.word_count, 9);
//! assert_eq!(result.avg_reading_time, 1);
//! assert_eq!(result.optimal_complexity, Complexity::TooBasic);
//! assert_eq!(result.tone_label, Tone::Informative);
//! ```

mod frequency;
mod readability;
mod stopwords;
mod tokenize;
mod tone;

pub use frequency::most_frequent_words;
pub use readability::{count_syllables, flesch_reading_ease, round2, ComplexityThresholds};
pub use tokenize::{sentences, words};
pub use tone::ToneLexicon;

use crate::config::AnalysisConfig;
use crate::model::AnalysisResult;
use crate::ConfigError;
use std::collections::HashSet;

/// Number of entries kept in `most_frequent_words`
pub const TOP_WORDS: usize = 10;

/// Scores post text for length, readability, complexity, tone and vocabulary
pub struct Analyzer {
    words_per_minute: u32,
    thresholds: ComplexityThresholds,
    lexicon: ToneLexicon,
    stop_words: HashSet<&'static str>,
}

impl Analyzer {
    /// Builds an analyzer from the `[analysis]` configuration section
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.words_per_minute,
            ComplexityThresholds::from(config),
            ToneLexicon::with_overrides(&config.tone_cues)?,
        ))
    }

    pub fn new(words_per_minute: u32, thresholds: ComplexityThresholds, lexicon: ToneLexicon) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
            thresholds,
            lexicon,
            stop_words: stopwords::english(),
        }
    }

    /// Computes every analytical field from `content_text`
    pub fn analyze(&self, content_text: &str) -> AnalysisResult {
        let tokens = words(content_text);
        let word_count = tokens.len();
        let sentence_count = sentences(content_text).len();
        let syllable_count: usize = tokens.iter().map(|w| count_syllables(w)).sum();

        let avg_sentence_length = round2(word_count as f64 / sentence_count.max(1) as f64);
        let readability_score = round2(flesch_reading_ease(
            word_count,
            sentence_count,
            syllable_count,
        ));

        AnalysisResult {
            word_count,
            avg_sentence_length,
            avg_reading_time: self.reading_time(word_count),
            readability_score,
            optimal_complexity: self.thresholds.classify(readability_score),
            tone_label: self.lexicon.classify(content_text),
            most_frequent_words: most_frequent_words(&tokens, &self.stop_words, TOP_WORDS),
        }
    }

    /// Whole minutes needed to read `word_count` words, rounded up
    fn reading_time(&self, word_count: usize) -> u32 {
        (word_count as u64).div_ceil(u64::from(self.words_per_minute)) as u32
    }
}
