// src/fetch/html.rs
// =============================================================================
// This module extracts links and readable text from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative URLs to absolute URLs
//
// Rust concepts:
// - Option<T>: For values that may be missing
// - Iterators: For walking the DOM tree
// - Closures: Anonymous functions (|x| ...)
// =============================================================================

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

// Elements whose text never shows up on screen
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

// Elements that start a new line when rendered; their edges separate words
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table", "tbody",
    "td", "tfoot", "th", "thead", "tr", "ul",
];

// Extracts all followable links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: absolute http(s) URLs in the order they appear, duplicates kept
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(base_url, error = %e, "cannot resolve links against invalid base URL");
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);

    // Selector::parse only fails on invalid CSS, and this one is a constant
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(&base, href))
        .collect()
}

// Collects the text a reader would see in the page body
//
// Text from <script>, <style> and friends is skipped. Text nodes are glued
// together as-is, so "<a>database</a>s" stays one word; only block-level
// elements and <br> add a break. Runs of whitespace then collapse to a
// single space.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let selector = Selector::parse("body").unwrap();
    let root = document
        .select(&selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Walks the element's subtree depth-first, appending every visible text node
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
            Node::Element(el) => {
                let is_block = BLOCK_ELEMENTS.contains(&el.name());
                if is_block {
                    out.push(' ');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
                if is_block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

// Resolves an href to an absolute URL we can crawl
//
// Parameters:
//   base: the URL of the current page
//   href: the href value (might be relative, might be absolute)
//
// Returns: Some(absolute_url) or None if it should not be followed
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "#history" -> None (same page)
//   href = "javascript:void(0)" -> None (not HTTP)
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    // Fragment-only links point back at the page we are already on
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // join() handles both cases: absolute hrefs replace the base entirely,
    // relative ones are resolved against it
    let url = base.join(href).ok()?;

    match url.scheme() {
        "http" | "https" => Some(url.into()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a text node?
//    - In the DOM, the words between tags are separate "text" nodes
//    - <p>Hello <b>world</b></p> has two: "Hello " and "world"
//    - We walk the tree and glue them together in document order
//    - Gluing without a space matters: <a>data</a>s must stay "datas"
//    - A <p> or <div> boundary is a line break on screen, so it adds a space
//
// 2. Why recursion in collect_text?
//    - HTML is a tree, and recursion is the natural way to walk a tree
//    - When we meet a <script>, we simply don't recurse into it
//
// 3. What does base.join(href) do?
//    - Resolves href the way a browser would
//    - "https://example.com/a/b" + "../c" = "https://example.com/c"
//    - An absolute href like "https://other.com" ignores the base
//
// 4. Why filter_map?
//    - It maps and drops None values in one step
//    - Perfect for "try to convert, skip what doesn't convert"
// -----------------------------------------------------------------------------
