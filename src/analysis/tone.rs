//! Lexicon-driven tone classification
//!
//! Each tone owns a list of cues. A cue is a word or phrase matched on word
//! boundaries, or a stem ending in `*` that matches any word starting with it
//! (`inspir*` matches "inspiring" and "inspiration"). Matching ignores case
//! and every occurrence counts toward the tone's score.

use crate::model::Tone;
use crate::ConfigError;
use regex::Regex;
use std::collections::BTreeMap;

fn builtin_cues(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Informative => &[
            "how to",
            "guide*",
            "overview",
            "learn*",
            "explain*",
            "step-by-step",
            "tutorial*",
            "for example",
            "introduc*",
            "in this post",
            "in this article",
            "here's how",
        ],
        Tone::Authoritative => &[
            "expert*",
            "authorit*",
            "certified",
            "proven",
            "research*",
            "study",
            "studies",
            "according to",
            "evidence",
            "analysis",
            "industry-leading",
            "best practice*",
        ],
        Tone::Persuasive => &[
            "should",
            "must",
            "convinc*",
            "persuad*",
            "don't miss",
            "sign up",
            "get started",
            "try it",
            "now is the time",
            "you need",
            "act now",
            "limited time",
        ],
        Tone::Inspirational => &[
            "inspir*",
            "motivat*",
            "encourag*",
            "dream*",
            "vision*",
            "empower*",
            "achieve*",
            "believe",
            "passion*",
            "journey",
        ],
        Tone::Empathetic => &[
            "understand*",
            "empath*",
            "feel*",
            "care",
            "caring",
            "support*",
            "we know",
            "struggl*",
            "you're not alone",
            "frustrat*",
        ],
        Tone::Humorous => &[
            "funny",
            "humor*",
            "humour*",
            "joke*",
            "hilarious",
            "amusing",
            "lol",
            "laugh*",
            "pun",
            "witty",
        ],
    }
}

/// Compiles one cue into a case-insensitive pattern
fn compile_cue(cue: &str) -> Result<Regex, ConfigError> {
    let cue = cue.trim();
    let (stem, prefix) = match cue.strip_suffix('*') {
        Some(stem) => (stem.trim(), true),
        None => (cue, false),
    };

    if stem.is_empty() {
        return Err(ConfigError::InvalidPattern(format!("empty cue '{}'", cue)));
    }

    let body = stem
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    // \b only makes sense next to a word character
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let lead = if is_word(stem.chars().next()) { r"\b" } else { "" };
    let tail = if prefix {
        r"\w*"
    } else if is_word(stem.chars().last()) {
        r"\b"
    } else {
        ""
    };
    let pattern = format!("(?i){}{}{}", lead, body, tail);

    Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", cue, e)))
}

/// Category to cue-pattern table used by the analyzer
pub struct ToneLexicon {
    /// Entries in tie-break priority order
    entries: Vec<(Tone, Vec<Regex>)>,
}

impl ToneLexicon {
    /// The built-in lexicon
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::with_overrides(&BTreeMap::new())
    }

    /// The built-in lexicon with the cues of some tones replaced
    ///
    /// Keys are tone names as accepted by [`Tone::from_key`]. Tones not named
    /// keep their built-in cues.
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut replaced: BTreeMap<Tone, &[String]> = BTreeMap::new();
        for (key, cues) in overrides {
            let tone = Tone::from_key(key).ok_or_else(|| {
                ConfigError::Validation(format!("Unknown tone '{}' in tone_cues", key))
            })?;
            replaced.insert(tone, cues.as_slice());
        }

        let mut entries = Vec::with_capacity(Tone::PRIORITY.len());
        for tone in Tone::PRIORITY {
            let patterns = match replaced.get(&tone) {
                Some(cues) => cues
                    .iter()
                    .map(|cue| compile_cue(cue))
                    .collect::<Result<Vec<_>, _>>()?,
                None => builtin_cues(tone)
                    .iter()
                    .map(|cue| compile_cue(cue))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            entries.push((tone, patterns));
        }

        Ok(Self { entries })
    }

    /// Per-tone cue hit counts in priority order
    pub fn scores(&self, text: &str) -> Vec<(Tone, usize)> {
        self.entries
            .iter()
            .map(|(tone, patterns)| {
                let hits = patterns.iter().map(|p| p.find_iter(text).count()).sum();
                (*tone, hits)
            })
            .collect()
    }

    /// Picks the tone with the highest score
    ///
    /// Ties go to the tone earlier in [`Tone::PRIORITY`]; text without any cue
    /// is Informative.
    pub fn classify(&self, text: &str) -> Tone {
        let mut best = (Tone::Informative, 0);
        for (tone, score) in self.scores(text) {
            if score > best.1 {
                best = (tone, score);
            }
        }
        best.0
    }
}
