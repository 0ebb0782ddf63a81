//! Output module for reporting analysis results
//!
//! This module handles loading aggregate statistics from storage and
//! rendering them for the terminal.

pub mod stats;

pub use stats::{format_statistics, load_statistics, print_statistics, AnalysisStatistics};
