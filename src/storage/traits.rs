//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::model::{CompanyRef, Complexity, EnrichedPost, PerformanceRecord, Tone};
use crate::storage::{RunRecord, RunStatus};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("No stored text with id {0}")]
    TextNotFound(i64),

    #[error("Corrupt stored value in {column}: {value}")]
    CorruptValue { column: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every write is independent; the pipeline never needs a transaction that
/// spans more than one record.
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new run and returns its ID
    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Closes a run with its final status, a finish timestamp and its post tallies
    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        posts_stored: u64,
        posts_failed: u64,
    ) -> StorageResult<()>;

    // ===== Companies =====

    /// Inserts a company or refreshes its name and URL
    fn upsert_company(&mut self, company: &CompanyRef) -> StorageResult<()>;

    /// Lists all companies ordered by ID
    fn list_companies(&self) -> StorageResult<Vec<CompanyRef>>;

    // ===== Posts =====

    /// Stores an analyzed post and returns its `text_id`
    ///
    /// A post already stored for the same `(company_id, url)` is replaced in
    /// place and keeps its `text_id`, so re-runs never duplicate rows.
    fn store_post(&mut self, post: &EnrichedPost) -> StorageResult<i64>;

    /// Loads a stored post by company and URL
    fn get_post(&self, company_id: i64, url: &str) -> StorageResult<Option<(i64, EnrichedPost)>>;

    /// Checks whether a text row exists
    fn text_exists(&self, text_id: i64) -> StorageResult<bool>;

    // ===== Performance =====

    /// Inserts or replaces a metrics row; the referenced text must exist
    fn upsert_performance(&mut self, record: &PerformanceRecord) -> StorageResult<()>;

    // ===== Statistics =====

    fn count_posts(&self) -> StorageResult<u64>;

    /// Post counts per company name, including companies without posts
    fn count_posts_by_company(&self) -> StorageResult<Vec<(String, u64)>>;

    fn count_posts_by_tone(&self) -> StorageResult<HashMap<Tone, u64>>;

    fn count_posts_by_complexity(&self) -> StorageResult<HashMap<Complexity, u64>>;

    /// Mean readability over all stored posts, `None` when there are none
    fn average_readability(&self) -> StorageResult<Option<f64>>;

    fn count_performance_rows(&self) -> StorageResult<u64>;
}
