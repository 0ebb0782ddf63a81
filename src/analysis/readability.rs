//! Flesch Reading Ease and complexity buckets

use crate::config::AnalysisConfig;
use crate::model::Complexity;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimates syllables in one word by counting vowel groups
///
/// A trailing silent `e` after a consonant is not counted (`make` is one
/// syllable) unless the word ends in consonant + `le` (`table` is two).
/// Every word has at least one syllable, including tokens without letters.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    if letters.is_empty() {
        return 1;
    }

    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    if groups > 1 && n >= 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) {
        let consonant_le = n >= 3 && letters[n - 2] == 'l' && !is_vowel(letters[n - 3]);
        if !consonant_le {
            groups -= 1;
        }
    }

    groups.max(1)
}

/// Flesch Reading Ease: `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`
///
/// Zero words score `0.0`; zero sentences are treated as one.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }

    let words = words as f64;
    let sentences = sentences.max(1) as f64;
    206.835 - 1.015 * (words / sentences) - 84.6 * (syllables as f64 / words)
}

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score thresholds separating the complexity buckets
///
/// Both bounds are inclusive on the easier side: a score equal to
/// `too_basic_at` is Too Basic and a score equal to `optimal_at` is Optimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityThresholds {
    pub too_basic_at: f64,
    pub optimal_at: f64,
}

impl Default for ComplexityThresholds {
    fn default() -> Self {
        Self {
            too_basic_at: 60.0,
            optimal_at: 30.0,
        }
    }
}

impl From<&AnalysisConfig> for ComplexityThresholds {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            too_basic_at: config.too_basic_at,
            optimal_at: config.optimal_at,
        }
    }
}

impl ComplexityThresholds {
    pub fn classify(&self, score: f64) -> Complexity {
        if score >= self.too_basic_at {
            Complexity::TooBasic
        } else if score >= self.optimal_at {
            Complexity::Optimal
        } else {
            Complexity::TooComplex
        }
    }
}
