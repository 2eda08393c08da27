// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout only carries the report)
// 2. Parse command-line arguments using clap
// 3. Crawl the seed page and its links
// 4. Print the per-page word counts and a summary
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: Network requests are async
// - Result<T, E>: For error handling (T = success type, E = error type)
// - anyhow::Context: Adds a human-readable message to errors
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;     // src/cli.rs - command-line parsing
mod config;  // src/config.rs - crawl and fetch settings
mod crawl;   // src/crawl/ - the crawl loop
mod fetch;   // src/fetch/ - HTTP fetching and HTML extraction
mod report;  // src/report.rs - printing results
mod words;   // src/words/ - tokenizing and counting

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use fetch::HttpFetcher;
use report::ReportOptions;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole chain: "context: cause: root cause"
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr at INFO unless RUST_LOG says otherwise
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse();
    let crawl_config = cli.crawl_config()?;
    let fetch_config = cli.fetch_config()?;

    let fetcher = HttpFetcher::new(&fetch_config).context("failed to build HTTP client")?;

    tracing::info!(
        seed = %crawl_config.seed_url,
        budget_secs = crawl_config.time_budget.as_secs_f64(),
        tokenizer = ?crawl_config.tokenization,
        "starting crawl"
    );

    let start = Instant::now();
    let result = crawl::crawl(&fetcher, &crawl_config).await?;
    let elapsed = start.elapsed();

    tracing::info!(
        visited = result.visited().len(),
        failed = result.failed_count(),
        "crawl finished"
    );

    let options = ReportOptions {
        json: cli.json,
        top: cli.top,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &result, elapsed, options)?;
    out.flush()?;

    Ok(())
}
