// src/crawl/result.rs
// =============================================================================
// The data a crawl produces.
//
// A CrawlResult is a list of pages in the order they were visited, plus the
// set of every URL the crawler attempted. Pages whose fetch failed are kept
// with `words: None` so the output still shows they were tried.
// =============================================================================

use std::collections::HashSet;

use crate::words::WordFrequency;

/// One visited URL and what we learned from it.
#[derive(Debug, Clone)]
pub struct PageEntry {
    pub url: String,
    /// None when the fetch failed
    pub words: Option<WordFrequency>,
}

impl PageEntry {
    pub fn is_ok(&self) -> bool {
        self.words.is_some()
    }
}

/// Everything a single crawl found.
#[derive(Debug, Clone, Default)]
pub struct CrawlResult {
    pages: Vec<PageEntry>,
    visited: HashSet<String>,
}

impl CrawlResult {
    // Only the crawler builds these, and only through this constructor,
    // so every page URL is guaranteed to be in the visited set
    pub(super) fn new(pages: Vec<PageEntry>, visited: HashSet<String>) -> Self {
        debug_assert!(pages.iter().all(|page| visited.contains(&page.url)));
        Self { pages, visited }
    }

    /// Pages in visit order (the seed first).
    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    /// Every URL the crawler attempted.
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Word counts for `url`, if it was visited and fetched successfully.
    #[cfg(test)]
    pub fn get(&self, url: &str) -> Option<&WordFrequency> {
        self.pages
            .iter()
            .find(|page| page.url == url)
            .and_then(|page| page.words.as_ref())
    }

    /// Number of visited URLs, failed ones included.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn failed_count(&self) -> usize {
        self.pages.iter().filter(|page| !page.is_ok()).count()
    }
}
