//! Per-company discovery and analysis pipeline
//!
//! For one company the pipeline fetches the blog root page, discovers the
//! candidate post links, then fetches, extracts and analyzes each post in
//! order. A post that cannot be fetched or has no article content is logged
//! and skipped; only an unusable root URL or an unreachable root page stops
//! the company.

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::crawler::discover::{discover_candidates, LinkPolicy};
use crate::crawler::extract::Extractor;
use crate::crawler::fetcher::Fetcher;
use crate::model::{CandidateLink, CompanyRef, EnrichedPost, RawPost};
use crate::{ConfigError, ExtractionError, LensError};
use std::ops::ControlFlow;
use url::Url;

/// Outcome counts for one company
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyReport {
    /// Candidate links found on the root page
    pub candidates: usize,
    /// Posts that were analyzed and handed to the caller
    pub processed: usize,
    pub fetch_failures: usize,
    pub extraction_failures: usize,
    /// The caller asked to stop before all candidates were processed
    pub stopped_early: bool,
}

impl CompanyReport {
    pub fn failures(&self) -> usize {
        self.fetch_failures + self.extraction_failures
    }
}

/// Turns a company's blog root URL into analyzed posts
pub struct Pipeline {
    fetcher: Fetcher,
    link_policy: LinkPolicy,
    extractor: Extractor,
    analyzer: Analyzer,
}

impl Pipeline {
    pub fn new(
        fetcher: Fetcher,
        link_policy: LinkPolicy,
        extractor: Extractor,
        analyzer: Analyzer,
    ) -> Self {
        Self {
            fetcher,
            link_policy,
            extractor,
            analyzer,
        }
    }

    /// Builds every stage from configuration
    pub fn from_config(config: &Config) -> Result<Self, LensError> {
        Ok(Self::new(
            Fetcher::new(&config.fetcher)?,
            LinkPolicy::from(&config.discovery),
            Extractor::new(&config.extraction)?,
            Analyzer::from_config(&config.analysis)?,
        ))
    }

    /// Number of HTTP requests issued so far across all companies
    pub fn requests_issued(&self) -> u64 {
        self.fetcher.requests_issued()
    }

    /// Extracts and analyzes one already-fetched post page
    ///
    /// This step is pure: identical input always yields an identical record.
    pub fn process_post_html(
        &self,
        company_id: i64,
        url: &str,
        html: &str,
    ) -> Result<EnrichedPost, ExtractionError> {
        let post = self.extractor.extract(html, url)?;
        let analysis = self.analyzer.analyze(&post.content_text);
        Ok(EnrichedPost::new(company_id, url.to_string(), post, analysis))
    }

    /// Fetches the root page and returns the candidate post links
    pub async fn discover_posts(
        &mut self,
        company: &CompanyRef,
    ) -> Result<Vec<CandidateLink>, LensError> {
        let root_url = parse_root_url(company)?;
        let root_html = self.fetcher.fetch(root_url.as_str()).await?;

        let candidates = discover_candidates(
            company.company_id,
            &root_html,
            &root_url,
            &self.link_policy,
        );

        tracing::info!(
            company_id = company.company_id,
            root = %root_url,
            found = candidates.len(),
            "Discovered candidate posts"
        );

        Ok(candidates)
    }

    /// Processes one company, handing each analyzed post to `on_post`
    ///
    /// Posts are delivered one at a time in discovery order. Returning
    /// `ControlFlow::Break` from `on_post` stops the company before any further
    /// fetch is issued; everything delivered so far remains valid.
    ///
    /// # Errors
    ///
    /// * `LensError::Config` - The root URL is malformed or not http(s)
    /// * `LensError::Fetch` - The root page could not be retrieved
    pub async fn process_company_with<F>(
        &mut self,
        company: &CompanyRef,
        mut on_post: F,
    ) -> Result<CompanyReport, LensError>
    where
        F: FnMut(EnrichedPost) -> ControlFlow<()>,
    {
        let candidates = self.discover_posts(company).await?;
        let mut report = CompanyReport {
            candidates: candidates.len(),
            ..CompanyReport::default()
        };

        for candidate in candidates {
            let raw = match self.fetcher.fetch(&candidate.url).await {
                Ok(html) => RawPost {
                    url: candidate.url,
                    html,
                },
                Err(e) => {
                    tracing::warn!(
                        company_id = company.company_id,
                        url = %e.url,
                        cause = %e.cause,
                        "Skipping post: fetch failed"
                    );
                    report.fetch_failures += 1;
                    continue;
                }
            };

            let post = match self.process_post_html(company.company_id, &raw.url, &raw.html) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!(
                        company_id = company.company_id,
                        url = %e.url,
                        reason = %e.reason,
                        "Skipping post: extraction failed"
                    );
                    report.extraction_failures += 1;
                    continue;
                }
            };

            tracing::debug!(
                company_id = company.company_id,
                url = %post.url,
                words = post.analysis.word_count,
                tone = %post.analysis.tone_label,
                top_words = %post.analysis.top_words_display(),
                "Analyzed post"
            );

            report.processed += 1;
            if on_post(post).is_break() {
                report.stopped_early = true;
                break;
            }
        }

        tracing::info!(
            company_id = company.company_id,
            processed = report.processed,
            failed = report.failures(),
            "Finished company"
        );

        Ok(report)
    }

    /// Processes one company and collects every analyzed post
    pub async fn process_company(
        &mut self,
        company: &CompanyRef,
    ) -> Result<Vec<EnrichedPost>, LensError> {
        let mut posts = Vec::new();
        self.process_company_with(company, |post| {
            posts.push(post);
            ControlFlow::Continue(())
        })
        .await?;
        Ok(posts)
    }
}

/// Parses a company's root URL, rejecting anything but absolute http(s)
fn parse_root_url(company: &CompanyRef) -> Result<Url, ConfigError> {
    let url = Url::parse(company.root_url.trim()).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "company {}: '{}': {}",
            company.company_id, company.root_url, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "company {}: '{}': unsupported scheme",
            company.company_id, company.root_url
        )));
    }

    Ok(url)
}
