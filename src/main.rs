//! Pagemap command-line entry point

use clap::Parser;
use pagemap::config::load_config_or_default;
use pagemap::progress::DiscoveryProgress;
use pagemap::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagemap: website discovery and content extraction
///
/// Discovers a site's pages through its sitemap (falling back to a homepage
/// crawl), builds a two-level page hierarchy, scrapes every page, and writes
/// a JSON snapshot of the result.
#[derive(Parser, Debug)]
#[command(name = "pagemap")]
#[command(version = "0.1.0")]
#[command(about = "Website discovery and content extraction", long_about = None)]
struct Cli {
    /// Base URL of the site to map
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scrape only this path, skipping discovery (repeatable)
    #[arg(long = "select", value_name = "PATH")]
    select: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref())?;
    let pipeline = Pipeline::new(config)?;

    if cli.select.is_empty() {
        run_discovery(&pipeline, &cli.url).await?;
    } else {
        run_selected(&pipeline, &cli.url, &cli.select).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagemap=info,warn"),
            1 => EnvFilter::new("pagemap=debug,info"),
            2 => EnvFilter::new("pagemap=trace,debug"),
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

/// Runs a full discovery and prints the resulting page tree
async fn run_discovery(pipeline: &Pipeline, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut sink = |p: &DiscoveryProgress| {
        tracing::info!(
            "[{:?}] {} (found {}, processed {}/{})",
            p.phase,
            p.current_action,
            p.urls_found,
            p.processed,
            p.total
        );
    };

    let pages = pipeline.discover(url, &mut sink).await?;

    println!("Discovered {} sections:", pages.len());
    for page in &pages {
        println!("  {} ({}, {:?})", page.title, page.url, page.page_type);
        for child in &page.children {
            println!("    {} ({})", child.title, child.url);
        }
    }

    Ok(())
}

/// Scrapes only the selected paths and prints the records as JSON
async fn run_selected(
    pipeline: &Pipeline,
    url: &str,
    paths: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let records = pipeline.scrape_selected(url, paths).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
