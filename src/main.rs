//! Market-Pulse main entry point
//!
//! This is the command-line interface for the Market-Pulse news crawler.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use market_pulse::config::{load_config_with_hash, Config};
use market_pulse::crawler::{expand_seeds, run_crawl};
use market_pulse::digest::{build_digest, LeadSummarizer, LexiconScorer, TickerLookup, YahooTickerLookup};
use market_pulse::output::{
    digest_file_name, format_digest_markdown, read_digest, relevant_articles, write_digest,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Market-Pulse: company news crawler and digest builder
///
/// Market-Pulse discovers recent news about a company from a few seed pages,
/// extracts the articles, and writes a sentiment-sorted digest.
#[derive(Parser, Debug)]
#[command(name = "market-pulse")]
#[command(version)]
#[command(about = "Company news crawler and digest builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Company name to collect news for (e.g. "Nvidia")
    #[arg(value_name = "COMPANY")]
    company: String,

    /// Run date used in the digest file name (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Ticker symbol, skipping the lookup
    #[arg(long)]
    ticker: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "show")]
    dry_run: bool,

    /// Show the relevant entries of an existing digest and exit
    #[arg(long, conflicts_with = "dry_run")]
    show: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let run_date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    if cli.dry_run {
        handle_dry_run(&config, &cli.company, cli.ticker.as_deref());
    } else if cli.show {
        handle_show(&config, &cli.company, run_date)?;
    } else {
        handle_crawl(&config, &cli.company, cli.ticker, run_date).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("market_pulse=info,warn"),
            1 => EnvFilter::new("market_pulse=debug,info"),
            2 => EnvFilter::new("market_pulse=trace,debug"),
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

/// Handles the --dry-run mode: shows configuration and expanded seeds
fn handle_dry_run(config: &Config, company: &str, ticker: Option<&str>) {
    println!("=== Market-Pulse Dry Run ===\n");

    println!("Company: {} (links matched on '{}')", company, company.to_lowercase());
    println!("Ticker: {}", ticker.unwrap_or("<looked up at run time>"));

    println!("\nCrawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);

    println!("\nDigest:");
    println!("  Article limit: {}", config.digest.article_limit);
    println!("  Output directory: {}", config.output.directory);

    let targets = expand_seeds(&config.seeds, ticker, &config.ticker.exchange);
    println!("\nSeeds ({} of {} resolvable):", targets.len(), config.seeds.len());
    for target in &targets {
        println!("  - {} (max depth {})", target.url, target.max_depth);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --show mode: prints the relevant entries of a stored digest
fn handle_show(config: &Config, company: &str, run_date: NaiveDate) -> anyhow::Result<()> {
    let path = Path::new(&config.output.directory).join(digest_file_name(company, run_date));

    let entries = read_digest(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let relevant = relevant_articles(
        &entries,
        config.digest.show_limit,
        config.digest.relevance_threshold,
    );

    print!("{}", format_digest_markdown(company, &relevant));
    Ok(())
}

/// Handles the main crawl: ticker lookup, crawl, digest, output
async fn handle_crawl(
    config: &Config,
    company: &str,
    ticker: Option<String>,
    run_date: NaiveDate,
) -> anyhow::Result<()> {
    let ticker = match ticker {
        Some(ticker) => Some(ticker),
        None => {
            let lookup = YahooTickerLookup::new(&config.ticker, &config.crawler)?;
            match lookup.lookup(company).await {
                Ok(symbol) => Some(symbol),
                Err(e) => {
                    tracing::warn!("Could not find ticker: {}", e);
                    None
                }
            }
        }
    };

    tracing::info!(
        "Crawling news for {} ({}) from {} seeds",
        company,
        ticker.as_deref().unwrap_or("no ticker"),
        config.seeds.len()
    );

    let articles = run_crawl(config, &company.to_lowercase(), ticker.as_deref())
        .await
        .context("crawl setup failed")?;

    let summarizer = LeadSummarizer::new(config.digest.summary_sentences);
    let scorer = LexiconScorer::new();
    let entries = build_digest(
        articles,
        ticker.as_deref(),
        &summarizer,
        &scorer,
        config.digest.article_limit,
    )
    .await;

    let path = write_digest(Path::new(&config.output.directory), company, run_date, &entries)?;

    if entries.is_empty() {
        println!("No articles found for {}", company);
    } else {
        println!("✓ {} articles written to {}", entries.len(), path.display());
    }

    Ok(())
}
