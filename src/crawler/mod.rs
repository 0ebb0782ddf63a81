//! Crawler module for blog discovery and post processing
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching with a courtesy delay between requests
//! - Post-link discovery on blog root pages
//! - Field and article text extraction
//! - Per-company processing and overall run coordination

mod coordinator;
mod discover;
mod extract;
mod fetcher;
mod pipeline;

pub use coordinator::{Coordinator, RunOptions, RunSummary};
pub use discover::{discover, discover_candidates, LinkPolicy};
pub use extract::{collapse_whitespace, DateParser, Extractor, FieldStrategy};
pub use fetcher::{build_http_client, Fetcher};
pub use pipeline::{CompanyReport, Pipeline};
