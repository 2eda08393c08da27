// src/report.rs
// =============================================================================
// Printing crawl results.
//
// Two formats:
// - Text: one line per page, "url: {word=count, ...}", then a summary line
// - JSON: pages and summary as a single pretty-printed object
//
// Words are always listed most frequent first. The report writes to any
// io::Write, so tests can check the exact output without capturing stdout.
// =============================================================================

use serde::{Serialize, Serializer};
use std::io::Write;
use std::time::Duration;

use crate::crawl::{CrawlResult, PageEntry};
use crate::words::WordFrequency;

/// How the report is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub json: bool,
    /// Only show this many words per page
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    pages: Vec<JsonPage<'a>>,
    summary: Summary,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    url: &'a str,
    words: Option<RankedWords<'a>>,
}

// (word, count) pairs written out as a JSON object, keeping their order
struct RankedWords<'a>(Vec<(&'a str, u64)>);

impl Serialize for RankedWords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().copied())
    }
}

#[derive(Serialize)]
struct Summary {
    urls: usize,
    failed: usize,
    elapsed_secs: f64,
}

// Writes the full report for a finished crawl
//
// Parameters:
//   out: where to write (stdout in main, a Vec<u8> in tests)
//   result: the crawl result
//   elapsed: wall-clock time of the whole run
//   options: text or JSON, and the per-page word limit
pub fn write_report<W: Write>(
    out: &mut W,
    result: &CrawlResult,
    elapsed: Duration,
    options: ReportOptions,
) -> anyhow::Result<()> {
    if options.json {
        let report = JsonReport {
            pages: result
                .pages()
                .iter()
                .map(|page| JsonPage {
                    url: &page.url,
                    words: page
                        .words
                        .as_ref()
                        .map(|words| RankedWords(limited(words, options.top))),
                })
                .collect(),
            summary: Summary {
                urls: result.len(),
                failed: result.failed_count(),
                elapsed_secs: elapsed.as_secs_f64(),
            },
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        for page in result.pages() {
            writeln!(out, "{}", format_page(page, options.top))?;
        }
        writeln!(out, "{}", format_summary(result.len(), elapsed))?;
    }
    Ok(())
}

// "url: {the=3, cat=2}" or "url: (no data)" for a failed fetch
pub fn format_page(page: &PageEntry, top: Option<usize>) -> String {
    match &page.words {
        Some(words) => {
            let body = limited(words, top)
                .iter()
                .map(|(word, count)| format!("{}={}", word, count))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {{{}}}", page.url, body)
        }
        None => format!("{}: (no data)", page.url),
    }
}

// "Crawled 12 urls in 3.4 seconds"
pub fn format_summary(urls: usize, elapsed: Duration) -> String {
    format!("Crawled {} urls in {:.1} seconds", urls, elapsed.as_secs_f64())
}

fn limited(words: &WordFrequency, top: Option<usize>) -> Vec<(&str, u64)> {
    match top {
        Some(n) => words.top(n),
        None => words.ranked(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::Tokenization;

    fn page(url: &str, text: Option<&str>) -> PageEntry {
        PageEntry {
            url: url.to_string(),
            words: text.map(|t| WordFrequency::count(t, Tokenization::Letters)),
        }
    }

    #[test]
    fn test_format_page_ranks_words() {
        let entry = page("https://example.com", Some("the cat sat on the mat the cat ran"));
        assert_eq!(
            format_page(&entry, None),
            "https://example.com: {the=3, cat=2, mat=1, on=1, ran=1, sat=1}"
        );
        assert_eq!(format_page(&entry, Some(2)), "https://example.com: {the=3, cat=2}");
    }

    #[test]
    fn test_format_failed_page() {
        let entry = page("https://example.com/missing", None);
        assert_eq!(format_page(&entry, None), "https://example.com/missing: (no data)");
    }

    #[test]
    fn test_format_empty_page() {
        let entry = page("https://example.com/blank", Some("123"));
        assert_eq!(format_page(&entry, None), "https://example.com/blank: {}");
    }

    #[test]
    fn test_summary_uses_one_decimal() {
        assert_eq!(
            format_summary(12, Duration::from_millis(3420)),
            "Crawled 12 urls in 3.4 seconds"
        );
        assert_eq!(format_summary(1, Duration::from_secs(60)), "Crawled 1 urls in 60.0 seconds");
    }

    #[test]
    fn test_write_report_for_empty_result() {
        let result = CrawlResult::default();

        let mut text = Vec::new();
        write_report(&mut text, &result, Duration::from_millis(500), ReportOptions::default()).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "Crawled 0 urls in 0.5 seconds\n");

        let mut json = Vec::new();
        let options = ReportOptions { json: true, top: None };
        write_report(&mut json, &result, Duration::from_millis(500), options).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["summary"]["urls"], 0);
        assert_eq!(value["summary"]["elapsed_secs"], 0.5);
        assert!(value["pages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_words_keep_ranked_order() {
        let words = RankedWords(vec![("zebra", 5), ("apple", 1)]);
        assert_eq!(serde_json::to_string(&words).unwrap(), r#"{"zebra":5,"apple":1}"#);

        let failed = JsonPage {
            url: "https://example.com",
            words: None,
        };
        assert_eq!(
            serde_json::to_string(&failed).unwrap(),
            r#"{"url":"https://example.com","words":null}"#
        );
    }
}
