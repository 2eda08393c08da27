// src/crawl/controller.rs
// =============================================================================
// This module drives a crawl: the seed page, then every link on it.
//
// How it works:
// 1. Fetch the seed page. If that fails there is nothing to crawl, so the
//    whole crawl fails.
// 2. Count the seed's words and mark it visited.
// 3. Walk the seed's links in document order. Before each one, check the
//    time budget; once it is used up, stop starting new fetches.
// 4. Skip links already visited, fetch the rest, count their words.
//    A page that fails to fetch is recorded with no data and the crawl
//    carries on.
//
// Only one level deep: links found on linked pages are never followed.
//
// Rust concepts:
// - Generics: crawl() works with any Fetcher (real HTTP or a test fake)
// - Streams: futures' stream combinators give us lazy, budget-aware
//   iteration and optional concurrency with buffered()
// - HashSet: To track visited URLs (O(1) lookup)
// =============================================================================

use futures::future;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use super::result::{CrawlResult, PageEntry};
use crate::config::CrawlConfig;
use crate::fetch::{FetchError, Fetcher};
use crate::words::{Tokenization, WordFrequency};

/// Failures that stop a crawl before any link is visited.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("could not fetch seed page {url}: {source}")]
    SeedFetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

// Mutable state for one crawl, owned by a single crawl() call
//
// Nothing here outlives the call: it is turned into the CrawlResult at
// the end
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<String>,
    pages: Vec<PageEntry>,
}

impl Traversal {
    fn into_result(self) -> CrawlResult {
        CrawlResult::new(self.pages, self.visited)
    }
}

// Crawls the seed page and the pages it links to
//
// Parameters:
//   fetcher: how pages are downloaded
//   config: seed URL, time budget, tokenizer and concurrency
//
// Returns: one entry per visited URL, or an error if the seed itself
// could not be crawled
pub async fn crawl<F: Fetcher>(fetcher: &F, config: &CrawlConfig) -> Result<CrawlResult, CrawlError> {
    let seed = config.seed_url.as_str();
    validate_seed(seed)?;

    let mut traversal = Traversal::default();

    let document = fetcher
        .fetch(seed)
        .await
        .map_err(|source| CrawlError::SeedFetch {
            url: seed.to_string(),
            source,
        })?;

    traversal.visited.insert(seed.to_string());
    traversal.pages.push(PageEntry {
        url: seed.to_string(),
        words: Some(WordFrequency::count(&document.text, config.tokenization)),
    });

    tracing::info!(url = seed, links = document.links.len(), "found links on seed page");

    // The budget covers link visits only, so the clock starts here
    let started = Instant::now();
    let budget = config.time_budget;
    let tokenization = config.tokenization;
    let visited = &mut traversal.visited;

    // Each combinator runs when the next link is pulled, which with
    // buffered(n) is exactly when a fetch slot frees up. So the budget
    // and the visited check both happen at dispatch time.
    let pages: Vec<PageEntry> = stream::iter(document.links)
        .take_while(|_| future::ready(started.elapsed() < budget))
        .filter(|url| {
            let is_new = visited.insert(url.clone());
            if !is_new {
                tracing::debug!(url = %url, "already visited, skipping");
            }
            future::ready(is_new)
        })
        .map(|url| visit(fetcher, url, tokenization))
        .buffered(config.concurrency.max(1))
        .collect()
        .await;

    if started.elapsed() >= budget {
        tracing::info!(budget_secs = budget.as_secs_f64(), "time budget used up");
    }

    traversal.pages.extend(pages);
    Ok(traversal.into_result())
}

// Fetches one linked page and counts its words
//
// Never fails: a fetch error becomes an entry with no words
async fn visit<F: Fetcher>(fetcher: &F, url: String, tokenization: Tokenization) -> PageEntry {
    tracing::info!(url = %url, "crawling");

    match fetcher.fetch(&url).await {
        Ok(document) => {
            let words = WordFrequency::count(&document.text, tokenization);
            if words.is_empty() {
                tracing::debug!(url = %url, "page has no words");
            } else {
                tracing::debug!(url = %url, distinct = words.len(), total = words.total(), "counted words");
            }
            PageEntry {
                url,
                words: Some(words),
            }
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "failed to fetch page");
            PageEntry { url, words: None }
        }
    }
}

// The seed has to be something we can actually request
fn validate_seed(seed: &str) -> Result<(), CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason,
    };

    let url = Url::parse(seed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is take_while on a stream?
//    - It yields items while the check returns true, then ends the stream
//    - Our check looks at the clock, so the stream simply stops once the
//      budget is gone and the remaining links are never touched
//
// 2. Why does visited.insert() double as the duplicate check?
//    - HashSet::insert returns true if the value was new, false if it was
//      already there
//    - So "check and mark" is a single operation
//
// 3. What does buffered(n) do?
//    - Runs up to n futures at once, but yields results in input order
//    - Its cousin, buffer_unordered, yields in completion order instead
//    - With n = 1 everything is sequential, one page at a time
//
// 4. Why tokio::time::Instant instead of std::time::Instant?
//    - It follows tokio's clock, which tests can pause and fast-forward
//    - In normal runs it behaves exactly like the std one
// -----------------------------------------------------------------------------
