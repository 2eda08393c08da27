// src/fetch/mod.rs
// =============================================================================
// This module fetches web pages and turns them into plain text plus links.
//
// Submodules:
// - http: Downloads pages with reqwest and classifies failures
// - html: Extracts visible text and outbound links from HTML
//
// The crawler only talks to the `Fetcher` trait defined here, so tests can
// hand it an in-memory fake instead of going to the network.
//
// Rust concepts:
// - Traits: An interface the crawler depends on
// - async-trait: Lets traits have async methods usable behind generics
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

mod html;
mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use html::{extract_links, visible_text};
pub use http::HttpFetcher;

/// A fetched page reduced to what the crawler needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Visible body text
    pub text: String,
    /// Absolute outbound links, in document order
    pub links: Vec<String>,
}

/// Why a page could not be fetched.
///
/// None of these stop a crawl on their own; the crawler records the page
/// as visited with no data and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Network, DNS, TLS, timeout or body read failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}")]
    HttpStatus { status: u16 },

    /// The response is not something we can pull words out of (PDF, image...)
    #[error("unsupported content type '{content_type}'")]
    UnsupportedContent { content_type: String },
}

/// Anything that can turn a URL into a `Document`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}
