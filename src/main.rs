//! Sitemap-Ripple main entry point
//!
//! This is the command-line interface for the Sitemap-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use sitemap_ripple::config::{load_config_with_hash, Config};
use sitemap_ripple::crawler::{Coordinator, HttpFetcher};
use sitemap_ripple::output::{print_statistics, to_xml, write_sitemap};
use sitemap_ripple::url::{seed_address, validate_seed};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap-Ripple: a bounded single-domain sitemap crawler
///
/// Crawls one site from a seed address, follows links that stay on the
/// seed's domain until the page budget is spent, and writes the nested
/// sitemap as an XML document.
#[derive(Parser, Debug)]
#[command(name = "sitemap-ripple")]
#[command(version = "1.0.0")]
#[command(about = "A bounded single-domain sitemap crawler", long_about = None)]
struct Cli {
    /// Host name, IP address or absolute URL to start from
    #[arg(value_name = "SEED")]
    seed: String,

    /// Maximum number of pages to fetch (falls back to the default unless a positive number)
    #[arg(value_name = "MAX_PAGES")]
    max_pages: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to write the sitemap to (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the sitemap to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    validate_seed(&cli.seed).with_context(|| format!("Invalid seed '{}'", cli.seed))?;

    let max_pages = parse_max_pages(cli.max_pages.as_deref(), config.crawler.max_pages);
    handle_crawl(&cli, &config, max_pages).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_ripple=info,warn"),
            1 => EnvFilter::new("sitemap_ripple=debug,info"),
            2 => EnvFilter::new("sitemap_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so --stdout output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Reads the page budget argument, using `default` when it is absent, not a number or zero
fn parse_max_pages(arg: Option<&str>, default: usize) -> usize {
    let Some(value) = arg else {
        return default;
    };

    match value.trim().parse::<usize>() {
        Ok(pages) if pages >= 1 => pages,
        _ => {
            tracing::warn!("Ignoring invalid page count '{}', using {}", value, default);
            default
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config, max_pages: usize) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)
        .context("Failed to build HTTP client")?;

    let seed = seed_address(&cli.seed);
    let mut coordinator = Coordinator::new(fetcher, seed, max_pages);
    coordinator.crawl().await;
    let (tree, _, stats) = coordinator.into_parts();

    if cli.stdout {
        println!("{}", to_xml(&tree, config.output.indent)?);
        return Ok(());
    }

    let directory = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));
    let path = write_sitemap(&directory, cli.seed.trim(), &tree, config.output.indent)
        .with_context(|| format!("Failed to write sitemap to {}", directory.display()))?;

    if !cli.quiet {
        println!("Sitemap written to: {}\n", path.display());
        print_statistics(&stats);
    }

    Ok(())
}
