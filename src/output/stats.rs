//! Statistics generation from the analysis database
//!
//! This module provides functionality for extracting and displaying
//! analysis statistics from the storage layer.

use crate::model::{Complexity, Tone};
use crate::storage::{RunRecord, Storage};
use crate::LensError;
use std::collections::HashMap;
use std::fmt::Write;

/// Analysis statistics summary
#[derive(Debug, Clone)]
pub struct AnalysisStatistics {
    /// Total number of stored posts
    pub total_posts: u64,

    /// Post counts per company name, in company ID order
    pub posts_by_company: Vec<(String, u64)>,

    /// Count of posts by tone label
    pub posts_by_tone: HashMap<Tone, u64>,

    /// Count of posts by complexity bucket
    pub posts_by_complexity: HashMap<Complexity, u64>,

    /// Mean readability score, if any post is stored
    pub average_readability: Option<f64>,

    /// Number of performance rows loaded
    pub performance_rows: u64,

    /// Most recent run, if any
    pub latest_run: Option<RunRecord>,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(AnalysisStatistics)` - Successfully loaded statistics
/// * `Err(LensError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> Result<AnalysisStatistics, LensError> {
    Ok(AnalysisStatistics {
        total_posts: storage.count_posts()?,
        posts_by_company: storage.count_posts_by_company()?,
        posts_by_tone: storage.count_posts_by_tone()?,
        posts_by_complexity: storage.count_posts_by_complexity()?,
        average_readability: storage.average_readability()?,
        performance_rows: storage.count_performance_rows()?,
        latest_run: storage.get_latest_run()?,
    })
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        (count as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

/// Renders statistics as a plain-text report
pub fn format_statistics(stats: &AnalysisStatistics) -> String {
    let mut out = String::new();
    // writing into a String never fails
    let _ = render(&mut out, stats);
    out
}

fn render(out: &mut impl Write, stats: &AnalysisStatistics) -> std::fmt::Result {
    writeln!(out, "=== Blog Analysis Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Posts stored: {}", stats.total_posts)?;
    match stats.average_readability {
        Some(avg) => writeln!(out, "  Average readability: {:.2}", avg)?,
        None => writeln!(out, "  Average readability: n/a")?,
    }
    writeln!(out, "  Performance rows: {}", stats.performance_rows)?;
    if let Some(run) = &stats.latest_run {
        writeln!(
            out,
            "  Latest run: #{} ({}, {} stored, {} failed)",
            run.id,
            run.status.to_db_string(),
            run.posts_stored,
            run.posts_failed
        )?;
    }
    writeln!(out)?;

    if !stats.posts_by_company.is_empty() {
        writeln!(out, "Posts by Company:")?;
        for (name, count) in &stats.posts_by_company {
            writeln!(out, "  {}: {}", name, count)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Posts by Tone:")?;
    for tone in Tone::PRIORITY {
        let count = stats.posts_by_tone.get(&tone).copied().unwrap_or(0);
        writeln!(
            out,
            "  {}: {} ({:.1}%)",
            tone,
            count,
            percentage(count, stats.total_posts)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Posts by Complexity:")?;
    for complexity in Complexity::all() {
        let count = stats
            .posts_by_complexity
            .get(&complexity)
            .copied()
            .unwrap_or(0);
        writeln!(
            out,
            "  {}: {} ({:.1}%)",
            complexity,
            count,
            percentage(count, stats.total_posts)
        )?;
    }

    Ok(())
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &AnalysisStatistics) {
    print!("{}", format_statistics(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisStatistics {
        let mut posts_by_tone = HashMap::new();
        posts_by_tone.insert(Tone::Informative, 3);
        posts_by_tone.insert(Tone::Humorous, 1);

        let mut posts_by_complexity = HashMap::new();
        posts_by_complexity.insert(Complexity::Optimal, 4);

        AnalysisStatistics {
            total_posts: 4,
            posts_by_company: vec![("Acme".to_string(), 4), ("Globex".to_string(), 0)],
            posts_by_tone,
            posts_by_complexity,
            average_readability: Some(52.5),
            performance_rows: 2,
            latest_run: None,
        }
    }

    #[test]
    fn test_format_statistics() {
        let report = format_statistics(&sample());
        assert!(report.contains("Posts stored: 4"));
        assert!(report.contains("Average readability: 52.50"));
        assert!(report.contains("Acme: 4"));
        assert!(report.contains("Globex: 0"));
        assert!(report.contains("Informative: 3 (75.0%)"));
        assert!(report.contains("Humorous: 1 (25.0%)"));
        assert!(report.contains("Empathetic: 0 (0.0%)"));
        assert!(report.contains("Optimal: 4 (100.0%)"));
        assert!(report.contains("Too Basic: 0 (0.0%)"));
    }

    #[test]
    fn test_format_empty_statistics() {
        let stats = AnalysisStatistics {
            total_posts: 0,
            posts_by_company: vec![],
            posts_by_tone: HashMap::new(),
            posts_by_complexity: HashMap::new(),
            average_readability: None,
            performance_rows: 0,
            latest_run: None,
        };
        let report = format_statistics(&stats);
        assert!(report.contains("Average readability: n/a"));
        assert!(!report.contains("Posts by Company"));
    }
}
