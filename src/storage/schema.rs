//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Blog-Lens database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track analysis runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    posts_stored INTEGER NOT NULL DEFAULT 0,
    posts_failed INTEGER NOT NULL DEFAULT 0
);

-- Companies whose blogs are analyzed
CREATE TABLE IF NOT EXISTS companies (
    company_id INTEGER PRIMARY KEY,
    company_name TEXT NOT NULL,
    company_url TEXT NOT NULL
);

-- One row per analyzed post
CREATE TABLE IF NOT EXISTS texts (
    text_id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL REFERENCES companies(company_id),
    url TEXT NOT NULL,
    title TEXT,
    publication_date TEXT,
    category TEXT,
    tags TEXT,
    content_text TEXT NOT NULL,
    word_count INTEGER NOT NULL,
    avg_sentence_length REAL NOT NULL,
    avg_reading_time INTEGER NOT NULL,
    tone_label TEXT NOT NULL,
    most_frequent_words TEXT NOT NULL,
    readability_score REAL NOT NULL,
    optimal_complexity TEXT NOT NULL,
    semantic_similarity_score REAL NOT NULL DEFAULT 0.0,
    scraped_at TEXT NOT NULL,
    UNIQUE(company_id, url)
);

CREATE INDEX IF NOT EXISTS idx_texts_company ON texts(company_id);
CREATE INDEX IF NOT EXISTS idx_texts_tone ON texts(tone_label);

-- Externally supplied engagement metrics
CREATE TABLE IF NOT EXISTS performance (
    metrics_id INTEGER PRIMARY KEY,
    text_id INTEGER NOT NULL REFERENCES texts(text_id),
    views INTEGER NOT NULL,
    ctr REAL NOT NULL,
    cr REAL NOT NULL,
    reshares INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_performance_text ON performance(text_id);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - SQLite connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_initializes() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert!(initialize_schema(&conn).is_ok());
    }

    #[test]
    fn test_tables_exist_after_init() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for table in ["runs", "companies", "texts", "performance"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table {} should exist", table);
        }
    }
}
