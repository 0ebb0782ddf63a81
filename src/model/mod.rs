//! Records that flow through the discovery and analysis pipeline
//!
//! Data moves strictly forward: a [`CompanyRef`] yields [`CandidateLink`]s,
//! each link is fetched into a [`RawPost`], extracted into a [`PostRecord`],
//! scored into an [`AnalysisResult`] and finally combined into an
//! [`EnrichedPost`] for storage.

mod labels;

pub use labels::{Complexity, Tone};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A company whose blog should be scanned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRef {
    pub company_id: i64,
    pub name: String,
    /// Absolute URL of the blog root page
    pub root_url: String,
}

/// A URL found on a company root page that probably points at a single post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub url: String,
    pub discovered_from: i64,
}

/// A fetched post page, discarded once extracted
#[derive(Debug, Clone)]
pub struct RawPost {
    pub url: String,
    pub html: String,
}

/// Structured fields pulled out of a post page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub title: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tags: Option<String>,
    /// Whitespace-collapsed article text; never empty
    pub content_text: String,
}

/// A word and how often it occurs in a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Scores derived from a post's `content_text`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub word_count: usize,
    pub avg_sentence_length: f64,
    /// Minutes, rounded up
    pub avg_reading_time: u32,
    pub readability_score: f64,
    pub optimal_complexity: Complexity,
    pub tone_label: Tone,
    /// At most ten entries, most frequent first
    pub most_frequent_words: Vec<WordCount>,
}

impl AnalysisResult {
    /// Comma-separated list of the top words, most frequent first
    pub fn top_words_display(&self) -> String {
        self.most_frequent_words
            .iter()
            .map(|wc| wc.word.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A fully analyzed, storage-ready post
///
/// Built once from a [`PostRecord`] and the [`AnalysisResult`] computed from
/// that record's own text, and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPost {
    pub company_id: i64,
    pub url: String,
    pub post: PostRecord,
    pub analysis: AnalysisResult,
}

impl EnrichedPost {
    pub fn new(company_id: i64, url: String, post: PostRecord, analysis: AnalysisResult) -> Self {
        Self {
            company_id,
            url,
            post,
            analysis,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.post.title.as_deref()
    }
}

/// Externally supplied engagement metrics for a stored post
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PerformanceRecord {
    pub metrics_id: i64,
    pub text_id: i64,
    pub views: i64,
    #[serde(rename = "CTR")]
    pub ctr: f64,
    #[serde(rename = "CR")]
    pub cr: f64,
    pub reshares: i64,
}
