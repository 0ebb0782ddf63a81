//! CSV ingestion of companies and performance metrics
//!
//! Companies are read before any scraping starts; performance rows are read
//! after the run so their `text_id` references can point at stored posts.
//! Headers are required and matched by name, surrounding whitespace trimmed.

use crate::model::{CompanyRef, PerformanceRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading input CSV files
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid row {row} in {path}: {reason}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

/// Row layout of the companies CSV
#[derive(Debug, Deserialize)]
struct CompanyRow {
    company_id: i64,
    company_name: String,
    company_url: String,
}

impl From<CompanyRow> for CompanyRef {
    fn from(row: CompanyRow) -> Self {
        Self {
            company_id: row.company_id,
            name: row.company_name,
            root_url: row.company_url,
        }
    }
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

/// Reads the companies CSV (`company_id, company_name, company_url`)
///
/// Blank URLs are rejected here; malformed URLs are left for the pipeline to
/// report per company.
pub fn read_companies(path: &Path) -> Result<Vec<CompanyRef>, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    read_companies_from(file, path)
}

/// Reads companies from any CSV source; `origin` only labels errors
pub fn read_companies_from<R: Read>(input: R, origin: &Path) -> Result<Vec<CompanyRef>, IngestError> {
    let mut companies = Vec::new();

    for (index, row) in reader(input).deserialize::<CompanyRow>().enumerate() {
        let row = row.map_err(|source| IngestError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;

        if row.company_url.is_empty() {
            return Err(IngestError::InvalidRow {
                path: origin.to_path_buf(),
                row: index + 1,
                reason: format!("company {} has no company_url", row.company_id),
            });
        }

        companies.push(CompanyRef::from(row));
    }

    tracing::debug!(path = %origin.display(), count = companies.len(), "Read companies");
    Ok(companies)
}

/// Reads the performance CSV (`metrics_id, text_id, views, CTR, CR, reshares`)
pub fn read_performance(path: &Path) -> Result<Vec<PerformanceRecord>, IngestError> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::Csv {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    read_performance_from(file, path)
}

/// Reads performance rows from any CSV source; `origin` only labels errors
pub fn read_performance_from<R: Read>(
    input: R,
    origin: &Path,
) -> Result<Vec<PerformanceRecord>, IngestError> {
    let records = reader(input)
        .deserialize::<PerformanceRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| IngestError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %origin.display(), count = records.len(), "Read performance rows");
    Ok(records)
}
