//! Run coordinator - main orchestration logic
//!
//! This module contains the outer run loop that:
//! - Reads the companies CSV and registers every company
//! - Drives the pipeline one company at a time
//! - Stores each analyzed post as soon as it is produced
//! - Loads performance metrics once posts are in place
//! - Records the run and its tallies

use crate::config::Config;
use crate::crawler::pipeline::Pipeline;
use crate::ingest::{read_companies, read_performance};
use crate::storage::{RunStatus, SqliteStorage, Storage, StorageError};
use crate::LensError;
use std::ops::ControlFlow;
use std::path::Path;

/// Restrictions for a single run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Only process the company with this ID
    pub company: Option<i64>,
    /// Stop once this many posts have been stored
    pub limit: Option<usize>,
}

/// What a run accomplished
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: i64,
    pub companies_processed: usize,
    pub companies_skipped: usize,
    pub posts_stored: u64,
    pub posts_failed: u64,
    pub performance_loaded: usize,
    pub performance_skipped: usize,
}

/// Main run coordinator structure
pub struct Coordinator {
    config: Config,
    pipeline: Pipeline,
    storage: SqliteStorage,
    run_id: i64,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `config_hash` - Hash recorded with the run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Storage opened and run registered
    /// * `Err(LensError)` - Failed to initialize
    pub fn new(config: Config, config_hash: &str) -> Result<Self, LensError> {
        let storage = SqliteStorage::new(Path::new(&config.output.database_path))?;
        let pipeline = Pipeline::from_config(&config)?;
        Self::with_parts(config, pipeline, storage, config_hash)
    }

    /// Creates a coordinator from already-built parts
    pub fn with_parts(
        config: Config,
        pipeline: Pipeline,
        mut storage: SqliteStorage,
        config_hash: &str,
    ) -> Result<Self, LensError> {
        let run_id = storage.create_run(config_hash)?;
        tracing::info!(run_id, "Registered run");

        Ok(Self {
            config,
            pipeline,
            storage,
            run_id,
        })
    }

    pub fn run_id(&self) -> i64 {
        self.run_id
    }

    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Runs the full pipeline over every company in the companies CSV
    ///
    /// Per-company and per-post failures are logged and counted; only
    /// unreadable CSV input or a failing run record aborts the run. An
    /// aborted run is still closed as failed with the tallies reached so far.
    pub async fn run(&mut self, options: &RunOptions) -> Result<RunSummary, LensError> {
        let started = std::time::Instant::now();
        let mut summary = RunSummary {
            run_id: self.run_id,
            ..RunSummary::default()
        };

        if let Err(e) = self.execute(options, &mut summary).await {
            tracing::error!(
                run_id = self.run_id,
                stored = summary.posts_stored,
                error = %e,
                "Run failed"
            );
            if let Err(close_err) = self.storage.finish_run(
                self.run_id,
                RunStatus::Failed,
                summary.posts_stored,
                summary.posts_failed,
            ) {
                tracing::error!(
                    run_id = self.run_id,
                    error = %close_err,
                    "Failed to record run failure"
                );
            }
            return Err(e);
        }

        self.storage.finish_run(
            self.run_id,
            RunStatus::Completed,
            summary.posts_stored,
            summary.posts_failed,
        )?;

        tracing::info!(
            run_id = self.run_id,
            companies = summary.companies_processed,
            skipped = summary.companies_skipped,
            stored = summary.posts_stored,
            failed = summary.posts_failed,
            requests = self.pipeline.requests_issued(),
            elapsed_secs = started.elapsed().as_secs(),
            "Run complete"
        );

        Ok(summary)
    }

    /// Ingests, scrapes and loads metrics, updating `summary` as it goes
    async fn execute(
        &mut self,
        options: &RunOptions,
        summary: &mut RunSummary,
    ) -> Result<(), LensError> {
        let companies: Vec<_> =
            read_companies(Path::new(&self.config.input.companies_csv))?
                .into_iter()
                .filter(|c| options.company.map_or(true, |id| c.company_id == id))
                .collect();

        if companies.is_empty() {
            tracing::warn!(
                path = %self.config.input.companies_csv,
                "No companies to process"
            );
        }

        for company in &companies {
            self.storage.upsert_company(company)?;
        }

        for company in &companies {
            if options
                .limit
                .is_some_and(|limit| summary.posts_stored >= limit as u64)
            {
                tracing::info!("Post limit reached, stopping");
                break;
            }

            tracing::info!(
                company_id = company.company_id,
                name = %company.name,
                "Processing company"
            );

            let storage = &mut self.storage;
            let mut stored = 0u64;
            let mut store_failures = 0u64;
            let already_stored = summary.posts_stored;

            let result = self
                .pipeline
                .process_company_with(company, |post| {
                    match storage.store_post(&post) {
                        Ok(text_id) => {
                            stored += 1;
                            tracing::debug!(text_id, url = %post.url, "Stored post");
                        }
                        Err(e) => {
                            store_failures += 1;
                            tracing::error!(url = %post.url, error = %e, "Failed to store post");
                        }
                    }

                    match options.limit {
                        Some(limit) if already_stored + stored >= limit as u64 => {
                            ControlFlow::Break(())
                        }
                        _ => ControlFlow::Continue(()),
                    }
                })
                .await;

            summary.posts_stored += stored;
            summary.posts_failed += store_failures;

            match result {
                Ok(report) => {
                    summary.companies_processed += 1;
                    summary.posts_failed += report.failures() as u64;
                }
                Err(e) => {
                    summary.companies_skipped += 1;
                    tracing::warn!(
                        company_id = company.company_id,
                        error = %e,
                        "Skipping company"
                    );
                }
            }
        }

        if let Some(path) = self.config.input.performance_csv.clone() {
            let (loaded, skipped) = self.load_performance(Path::new(&path))?;
            summary.performance_loaded = loaded;
            summary.performance_skipped = skipped;
        }

        Ok(())
    }

    /// Loads performance rows whose `text_id` refers to a stored post
    fn load_performance(&mut self, path: &Path) -> Result<(usize, usize), LensError> {
        let records = read_performance(path)?;
        let mut loaded = 0;
        let mut skipped = 0;

        for record in &records {
            match self.storage.upsert_performance(record) {
                Ok(()) => loaded += 1,
                Err(StorageError::TextNotFound(text_id)) => {
                    skipped += 1;
                    tracing::warn!(
                        metrics_id = record.metrics_id,
                        text_id,
                        "Skipping performance row for unknown text"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(loaded, skipped, "Loaded performance data");
        Ok((loaded, skipped))
    }
}
