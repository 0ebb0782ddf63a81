//! Configuration module for Blog-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use blog_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("blog-lens.toml")).unwrap();
//! println!("Posts per company: {}", config.discovery.max_links);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalysisConfig, Config, DiscoveryConfig, ExtractionConfig, FetcherConfig, InputConfig,
    OutputConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
