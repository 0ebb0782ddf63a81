//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::model::{
    AnalysisResult, CompanyRef, Complexity, EnrichedPost, PerformanceRecord, PostRecord, Tone,
    WordCount,
};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{RunRecord, RunStatus};
use crate::LensError;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(LensError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, LensError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, LensError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn run_from_row(row: &Row) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
            .unwrap_or(RunStatus::Running),
        posts_stored: row.get::<_, i64>(5)? as u64,
        posts_failed: row.get::<_, i64>(6)? as u64,
    })
}

/// A `texts` row as stored, before label and JSON decoding
struct StoredText {
    text_id: i64,
    company_id: i64,
    url: String,
    title: Option<String>,
    publication_date: Option<String>,
    category: Option<String>,
    tags: Option<String>,
    content_text: String,
    word_count: i64,
    avg_sentence_length: f64,
    avg_reading_time: u32,
    tone_label: String,
    most_frequent_words: String,
    readability_score: f64,
    optimal_complexity: String,
}

impl StoredText {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            text_id: row.get(0)?,
            company_id: row.get(1)?,
            url: row.get(2)?,
            title: row.get(3)?,
            publication_date: row.get(4)?,
            category: row.get(5)?,
            tags: row.get(6)?,
            content_text: row.get(7)?,
            word_count: row.get(8)?,
            avg_sentence_length: row.get(9)?,
            avg_reading_time: row.get(10)?,
            tone_label: row.get(11)?,
            most_frequent_words: row.get(12)?,
            readability_score: row.get(13)?,
            optimal_complexity: row.get(14)?,
        })
    }

    fn into_post(self) -> StorageResult<(i64, EnrichedPost)> {
        let publication_date = match self.publication_date {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| {
                StorageError::CorruptValue {
                    column: "publication_date",
                    value: raw.clone(),
                }
            })?),
            None => None,
        };

        let tone_label =
            Tone::from_db_string(&self.tone_label).ok_or_else(|| StorageError::CorruptValue {
                column: "tone_label",
                value: self.tone_label.clone(),
            })?;

        let optimal_complexity = Complexity::from_db_string(&self.optimal_complexity)
            .ok_or_else(|| StorageError::CorruptValue {
                column: "optimal_complexity",
                value: self.optimal_complexity.clone(),
            })?;

        let most_frequent_words: Vec<WordCount> =
            serde_json::from_str(&self.most_frequent_words)?;

        let post = PostRecord {
            title: self.title,
            publication_date,
            category: self.category,
            tags: self.tags,
            content_text: self.content_text,
        };

        let analysis = AnalysisResult {
            word_count: self.word_count as usize,
            avg_sentence_length: self.avg_sentence_length,
            avg_reading_time: self.avg_reading_time,
            readability_score: self.readability_score,
            optimal_complexity,
            tone_label,
            most_frequent_words,
        };

        Ok((
            self.text_id,
            EnrichedPost::new(self.company_id, self.url, post, analysis),
        ))
    }
}

impl Storage for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status, posts_stored, posts_failed
             FROM runs WHERE id = ?1",
        )?;

        stmt.query_row(params![run_id], run_from_row)
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status, posts_stored, posts_failed
             FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        Ok(stmt.query_row([], run_from_row).optional()?)
    }

    fn finish_run(
        &mut self,
        run_id: i64,
        status: RunStatus,
        posts_stored: u64,
        posts_failed: u64,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, posts_stored = ?3, posts_failed = ?4
             WHERE id = ?5",
            params![
                status.to_db_string(),
                now,
                posts_stored as i64,
                posts_failed as i64,
                run_id
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }

    // ===== Companies =====

    fn upsert_company(&mut self, company: &CompanyRef) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO companies (company_id, company_name, company_url) VALUES (?1, ?2, ?3)
             ON CONFLICT(company_id) DO UPDATE SET
                company_name = excluded.company_name,
                company_url = excluded.company_url",
            params![company.company_id, company.name, company.root_url],
        )?;
        Ok(())
    }

    fn list_companies(&self) -> StorageResult<Vec<CompanyRef>> {
        let mut stmt = self.conn.prepare(
            "SELECT company_id, company_name, company_url FROM companies ORDER BY company_id",
        )?;

        let companies = stmt
            .query_map([], |row| {
                Ok(CompanyRef {
                    company_id: row.get(0)?,
                    name: row.get(1)?,
                    root_url: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(companies)
    }

    // ===== Posts =====

    fn store_post(&mut self, post: &EnrichedPost) -> StorageResult<i64> {
        let record = &post.post;
        let analysis = &post.analysis;
        let publication_date = record
            .publication_date
            .map(|d| d.format(DATE_FORMAT).to_string());
        let top_words = serde_json::to_string(&analysis.most_frequent_words)?;
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO texts (
                company_id, url, title, publication_date, category, tags, content_text,
                word_count, avg_sentence_length, avg_reading_time, tone_label,
                most_frequent_words, readability_score, optimal_complexity,
                semantic_similarity_score, scraped_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, 0.0, ?15)
             ON CONFLICT(company_id, url) DO UPDATE SET
                title = excluded.title,
                publication_date = excluded.publication_date,
                category = excluded.category,
                tags = excluded.tags,
                content_text = excluded.content_text,
                word_count = excluded.word_count,
                avg_sentence_length = excluded.avg_sentence_length,
                avg_reading_time = excluded.avg_reading_time,
                tone_label = excluded.tone_label,
                most_frequent_words = excluded.most_frequent_words,
                readability_score = excluded.readability_score,
                optimal_complexity = excluded.optimal_complexity,
                scraped_at = excluded.scraped_at",
            params![
                post.company_id,
                post.url,
                record.title,
                publication_date,
                record.category,
                record.tags,
                record.content_text,
                analysis.word_count as i64,
                analysis.avg_sentence_length,
                analysis.avg_reading_time,
                analysis.tone_label.to_db_string(),
                top_words,
                analysis.readability_score,
                analysis.optimal_complexity.to_db_string(),
                now,
            ],
        )?;

        // last_insert_rowid is stale after the update branch of an upsert
        let text_id = self.conn.query_row(
            "SELECT text_id FROM texts WHERE company_id = ?1 AND url = ?2",
            params![post.company_id, post.url],
            |row| row.get(0),
        )?;

        Ok(text_id)
    }

    fn get_post(&self, company_id: i64, url: &str) -> StorageResult<Option<(i64, EnrichedPost)>> {
        let mut stmt = self.conn.prepare(
            "SELECT text_id, company_id, url, title, publication_date, category, tags,
             content_text, word_count, avg_sentence_length, avg_reading_time, tone_label,
             most_frequent_words, readability_score, optimal_complexity
             FROM texts WHERE company_id = ?1 AND url = ?2",
        )?;

        let stored = stmt
            .query_row(params![company_id, url], StoredText::from_row)
            .optional()?;

        stored.map(StoredText::into_post).transpose()
    }

    fn text_exists(&self, text_id: i64) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT text_id FROM texts WHERE text_id = ?1",
                params![text_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    // ===== Performance =====

    fn upsert_performance(&mut self, record: &PerformanceRecord) -> StorageResult<()> {
        if !self.text_exists(record.text_id)? {
            return Err(StorageError::TextNotFound(record.text_id));
        }

        self.conn.execute(
            "INSERT INTO performance (metrics_id, text_id, views, ctr, cr, reshares)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(metrics_id) DO UPDATE SET
                text_id = excluded.text_id,
                views = excluded.views,
                ctr = excluded.ctr,
                cr = excluded.cr,
                reshares = excluded.reshares",
            params![
                record.metrics_id,
                record.text_id,
                record.views,
                record.ctr,
                record.cr,
                record.reshares
            ],
        )?;
        Ok(())
    }

    // ===== Statistics =====

    fn count_posts(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM texts", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_posts_by_company(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.company_name, COUNT(t.text_id)
             FROM companies c LEFT JOIN texts t ON t.company_id = c.company_id
             GROUP BY c.company_id
             ORDER BY c.company_id",
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counts)
    }

    fn count_posts_by_tone(&self) -> StorageResult<HashMap<Tone, u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tone_label, COUNT(*) FROM texts GROUP BY tone_label")?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = HashMap::new();
        for (label, count) in rows {
            let tone = Tone::from_db_string(&label).ok_or(StorageError::CorruptValue {
                column: "tone_label",
                value: label.clone(),
            })?;
            counts.insert(tone, count);
        }
        Ok(counts)
    }

    fn count_posts_by_complexity(&self) -> StorageResult<HashMap<Complexity, u64>> {
        let mut stmt = self.conn.prepare(
            "SELECT optimal_complexity, COUNT(*) FROM texts GROUP BY optimal_complexity",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = HashMap::new();
        for (label, count) in rows {
            let complexity =
                Complexity::from_db_string(&label).ok_or(StorageError::CorruptValue {
                    column: "optimal_complexity",
                    value: label.clone(),
                })?;
            counts.insert(complexity, count);
        }
        Ok(counts)
    }

    fn average_readability(&self) -> StorageResult<Option<f64>> {
        let average: Option<f64> =
            self.conn
                .query_row("SELECT AVG(readability_score) FROM texts", [], |row| {
                    row.get(0)
                })?;
        Ok(average)
    }

    fn count_performance_rows(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM performance", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
