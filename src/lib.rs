//! Blog-Lens: blog content discovery and analysis
//!
//! This crate discovers blog posts on company sites, extracts their text,
//! scores each post for readability, tone, complexity and word frequency,
//! and persists the enriched records next to externally supplied
//! performance metrics.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod ingest;
pub mod model;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Blog-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] ingest::IngestError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// A malformed company root URL is also reported through this type so the
/// orchestrator can skip that single company.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid cue pattern: {0}")]
    InvalidPattern(String),
}

/// Why a single fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCause {
    /// The server answered with a non-2xx status
    Status(u16),
    /// Connect or read timeout elapsed
    Timeout,
    /// The connection could not be established
    Connect(String),
    /// The response body could not be read as text
    Body(String),
    /// Any other request failure
    Request(String),
}

impl std::fmt::Display for FetchCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect(e) => write!(f, "connection failed: {}", e),
            Self::Body(e) => write!(f, "unreadable body: {}", e),
            Self::Request(e) => write!(f, "request failed: {}", e),
        }
    }
}

/// A URL could not be retrieved; recoverable by skipping that URL
#[derive(Debug, Clone, Error)]
#[error("Fetch failed for {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: FetchCause,
}

/// A post page had no usable article content; recoverable by skipping the post
#[derive(Debug, Clone, Error)]
#[error("Extraction failed for {url}: {reason}")]
pub struct ExtractionError {
    pub url: String,
    pub reason: String,
}

/// Result type alias for Blog-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

// Re-export commonly used types
pub use analysis::Analyzer;
pub use config::Config;
pub use crawler::{Coordinator, Pipeline};
pub use model::{AnalysisResult, CompanyRef, Complexity, EnrichedPost, PostRecord, Tone};
