// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Nothing is required: running `word-crawler` on its own crawls the
// default seed page for 60 seconds. Every setting can be overridden with a
// flag, and the seed URL and budget also with environment variables.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate the parsing code
// - Result: Flags are validated when turned into config structs
// =============================================================================

use clap::Parser;

use crate::config::{
    budget_from_secs, timeout_from_secs, validate_concurrency, ConfigError, CrawlConfig,
    FetchConfig, DEFAULT_BUDGET_SECS, DEFAULT_REFERRER, DEFAULT_SEED_URL, DEFAULT_USER_AGENT,
};
use crate::words::Tokenization;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "word-crawler",
    version = "0.1.0",
    about = "Crawl a page and the pages it links to, counting the words on each",
    long_about = "word-crawler fetches a seed page, follows every link on it until the time \
                  budget runs out, and prints a word-frequency table for each page it visited."
)]
pub struct Cli {
    /// Page to start from
    ///
    /// Every link on this page is visited (one level deep, no further)
    #[arg(env = "WORD_CRAWLER_SEED", default_value = DEFAULT_SEED_URL)]
    pub seed_url: String,

    /// Seconds allowed for visiting links (fractions allowed, e.g. 0.5)
    ///
    /// The seed fetch is not counted. A fetch already in flight when the
    /// budget runs out is allowed to finish.
    #[arg(long, env = "WORD_CRAWLER_BUDGET", default_value_t = DEFAULT_BUDGET_SECS)]
    pub budget: f64,

    /// How page text is split into words
    #[arg(long, value_enum, default_value_t = Tokenization::Letters)]
    pub tokenizer: Tokenization,

    /// Maximum number of pages fetched at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Only print the N most frequent words of each page
    #[arg(long)]
    pub top: Option<usize>,

    /// Output results in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Referer header sent with every request
    #[arg(long, default_value = DEFAULT_REFERRER)]
    pub referrer: String,

    /// Give up on a single page after this many seconds (default: never)
    #[arg(long)]
    pub request_timeout: Option<f64>,
}

impl Cli {
    pub fn crawl_config(&self) -> Result<CrawlConfig, ConfigError> {
        Ok(CrawlConfig::new(self.seed_url.clone())
            .with_time_budget(budget_from_secs(self.budget)?)
            .with_tokenization(self.tokenizer)
            .with_concurrency(validate_concurrency(self.concurrency)?))
    }

    pub fn fetch_config(&self) -> Result<FetchConfig, ConfigError> {
        Ok(FetchConfig {
            user_agent: self.user_agent.clone(),
            referrer: self.referrer.clone(),
            request_timeout: self.request_timeout.map(timeout_from_secs).transpose()?,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Where do default values come from?
//    - default_value / default_value_t use the constants in src/config.rs
//    - That way the CLI and CrawlConfig::default() can never disagree
//
// 2. What does env = "..." do?
//    - If the flag isn't given, clap looks at that environment variable
//    - Precedence: flag > environment variable > default value
//
// 3. Why is `budget` an f64 and not a Duration?
//    - Users type seconds, and fractions like 0.1 are useful for quick runs
//    - crawl_config() validates it and converts it into a Duration
//
// 4. What is Option::transpose()?
//    - Turns Option<Result<T, E>> into Result<Option<T>, E>
//    - So `?` can propagate an invalid timeout while keeping None as None
// -----------------------------------------------------------------------------
