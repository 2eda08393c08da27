// src/config.rs
// =============================================================================
// Settings for a crawl, independent of where they came from.
//
// The CLI (src/cli.rs) fills these in from flags and environment variables,
// but tests build them directly with Default plus the with_* methods.
//
// Two groups:
// - CrawlConfig: what to crawl and how (seed, time budget, tokenizer...)
// - FetchConfig: how each HTTP request looks (headers, optional timeout)
// =============================================================================

use std::time::Duration;
use thiserror::Error;

use crate::words::Tokenization;

/// The page we start from when no seed is given.
pub const DEFAULT_SEED_URL: &str = "https://en.wikipedia.org/wiki/Big_data";

/// Budget for visiting links, in seconds.
pub const DEFAULT_BUDGET_SECS: f64 = 60.0;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.14; rv:60.0) Gecko/20100101 Firefox/60.0";

pub const DEFAULT_REFERRER: &str = "http://www.google.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("time budget must be a positive number of seconds, got {0}")]
    InvalidBudget(f64),

    #[error("request timeout must be a positive number of seconds, got {0}")]
    InvalidRequestTimeout(f64),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed_url: String,
    /// How long link visits may keep starting; the seed fetch is not counted
    pub time_budget: Duration,
    pub tokenization: Tokenization,
    /// Maximum fetches in flight at once (1 = strictly sequential)
    pub concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            time_budget: Duration::from_secs(DEFAULT_BUDGET_SECS as u64),
            tokenization: Tokenization::default(),
            concurrency: 1,
        }
    }
}

impl CrawlConfig {
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            ..Self::default()
        }
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    pub fn with_tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub referrer: String,
    /// Per-request timeout; None means wait as long as the server takes
    pub request_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referrer: DEFAULT_REFERRER.to_string(),
            request_timeout: None,
        }
    }
}

// Converts a user-supplied number of seconds into a Duration
//
// Duration::from_secs_f64 panics on negative, NaN or huge values,
// so everything is checked here first
pub fn budget_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    positive_duration(secs).ok_or(ConfigError::InvalidBudget(secs))
}

pub fn timeout_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    positive_duration(secs).ok_or(ConfigError::InvalidRequestTimeout(secs))
}

fn positive_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}

pub fn validate_concurrency(concurrency: usize) -> Result<usize, ConfigError> {
    if concurrency == 0 {
        Err(ConfigError::ZeroConcurrency)
    } else {
        Ok(concurrency)
    }
}
