// src/crawl/mod.rs
// =============================================================================
// This module handles crawling: one seed page plus the pages it links to.
//
// Features:
// - Visits links in the order they appear on the seed page
// - Never fetches the same URL twice in one crawl
// - Stops starting new fetches once the time budget is used up
// - Keeps going when individual pages fail
//
// Submodules:
// - controller: the crawl loop itself
// - result: what a crawl returns
// =============================================================================

mod controller;
mod result;

pub use controller::crawl;
pub use result::{CrawlResult, PageEntry};
