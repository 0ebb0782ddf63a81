//! Blog-Lens main entry point
//!
//! This is the command-line interface for the Blog-Lens content analyzer.

use anyhow::Context;
use blog_lens::config::{load_config_with_hash, Config};
use blog_lens::crawler::{Coordinator, RunOptions};
use blog_lens::ingest::read_companies;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Blog-Lens: blog content discovery and analysis
///
/// Blog-Lens reads a list of companies, discovers recent posts on each
/// company blog, scores every post for readability, tone, complexity and
/// vocabulary, and stores the results in SQLite next to performance metrics.
#[derive(Parser, Debug)]
#[command(name = "blog-lens")]
#[command(version = "1.0.0")]
#[command(about = "Blog content discovery and analysis", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and list the companies that would be processed
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Only process the company with this ID
    #[arg(long, value_name = "ID")]
    company: Option<i64>,

    /// Stop after storing this many posts
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else if cli.stats {
        handle_stats(&config)
    } else {
        let options = RunOptions {
            company: cli.company,
            limit: cli.limit,
        };
        handle_run(config, &config_hash, &options).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("blog_lens=info,warn"),
            1 => EnvFilter::new("blog_lens=debug,info"),
            2 => EnvFilter::new("blog_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and lists the companies
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Blog-Lens Dry Run ===\n");

    println!("Fetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!(
        "  Delay between requests: {}-{}ms",
        config.fetcher.min_delay_ms, config.fetcher.max_delay_ms
    );

    println!("\nDiscovery:");
    println!("  Max posts per company: {}", config.discovery.max_links);
    println!("  Min path segments: {}", config.discovery.min_path_segments);

    println!("\nAnalysis:");
    println!("  Words per minute: {}", config.analysis.words_per_minute);
    println!(
        "  Complexity thresholds: Too Basic >= {}, Optimal >= {}",
        config.analysis.too_basic_at, config.analysis.optimal_at
    );
    if !config.analysis.tone_cues.is_empty() {
        let tones: Vec<&str> = config.analysis.tone_cues.keys().map(String::as_str).collect();
        println!("  Custom tone cues: {}", tones.join(", "));
    }

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    let companies = read_companies(Path::new(&config.input.companies_csv))?;
    println!(
        "\nCompanies ({}) from {}:",
        companies.len(),
        config.input.companies_csv
    );
    for company in &companies {
        println!(
            "  - [{}] {} {}",
            company.company_id, company.name, company.root_url
        );
    }

    if let Some(path) = &config.input.performance_csv {
        println!("\nPerformance data: {}", path);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would analyze up to {} posts",
        companies.len() * config.discovery.max_links
    );

    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use blog_lens::output::{load_statistics, print_statistics};
    use blog_lens::storage::open_storage;

    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main analysis run
async fn handle_run(config: Config, config_hash: &str, options: &RunOptions) -> anyhow::Result<()> {
    if let Some(id) = options.company {
        tracing::info!("Restricting run to company {}", id);
    }
    if let Some(limit) = options.limit {
        tracing::info!("Stopping after {} stored posts", limit);
    }

    let mut coordinator = Coordinator::new(config, config_hash)?;

    match coordinator.run(options).await {
        Ok(summary) => {
            println!("=== Run {} complete ===", summary.run_id);
            println!(
                "  Companies: {} processed, {} skipped",
                summary.companies_processed, summary.companies_skipped
            );
            println!(
                "  Posts: {} stored, {} failed",
                summary.posts_stored, summary.posts_failed
            );
            println!(
                "  Performance rows: {} loaded, {} skipped",
                summary.performance_loaded, summary.performance_skipped
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
