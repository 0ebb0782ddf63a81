use serde::Deserialize;
use std::collections::BTreeMap;

/// Browser identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Main configuration structure for Blog-Lens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// User-Agent header; must look like a regular browser
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Connect and read timeout in seconds (10..=15)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Lower bound of the pause before every request after the first (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the pause before every request after the first (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
        }
    }
}

/// Post-link qualification policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum number of candidate posts per company
    #[serde(rename = "max-links")]
    pub max_links: usize,

    /// Minimum number of non-empty path segments a post URL must have
    #[serde(rename = "min-path-segments")]
    pub min_path_segments: usize,

    /// Path segments that mark a blog section (replaces the built-in list)
    #[serde(rename = "post-indicators")]
    pub post_indicators: Option<Vec<String>>,

    /// Path segments that mark listing or utility pages (replaces the built-in list)
    #[serde(rename = "excluded-segments")]
    pub excluded_segments: Option<Vec<String>>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_links: 20,
            min_path_segments: 2,
            post_indicators: None,
            excluded_segments: None,
        }
    }
}

/// Article extraction policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Text length a container must reach to be accepted outright
    #[serde(rename = "min-content-chars")]
    pub min_content_chars: usize,

    /// CSS selectors for the article container, tried in order
    #[serde(rename = "content-selectors")]
    pub content_selectors: Option<Vec<String>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 100,
            content_selectors: None,
        }
    }
}

/// Scoring parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    #[serde(rename = "words-per-minute")]
    pub words_per_minute: u32,

    /// Scores at or above this are "Too Basic"
    #[serde(rename = "too-basic-at")]
    pub too_basic_at: f64,

    /// Scores at or above this (and below `too-basic-at`) are "Optimal"
    #[serde(rename = "optimal-at")]
    pub optimal_at: f64,

    /// Per-tone cue lists keyed by lowercase tone name; replaces the built-in cues
    /// for the named tones only
    #[serde(rename = "tone-cues")]
    pub tone_cues: BTreeMap<String, Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            too_basic_at: 60.0,
            optimal_at: 30.0,
            tone_cues: BTreeMap::new(),
        }
    }
}

/// CSV inputs
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the companies CSV (company_id, company_name, company_url)
    #[serde(rename = "companies-csv")]
    pub companies_csv: String,

    /// Path to the performance CSV, loaded after scraping
    #[serde(rename = "performance-csv", default)]
    pub performance_csv: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
