// src/fetch/http.rs
// =============================================================================
// This module downloads pages over HTTP.
//
// Key functionality:
// - Sends a browser-like User-Agent and a Referer so sites don't treat us
//   as an obvious bot
// - Turns non-2xx statuses and non-HTML content into distinct errors
// - Hands the HTML to the html module for text and link extraction
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: Every failure mode is a FetchError variant
// - Builder pattern: reqwest::Client::builder()
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use url::Url;

use super::{extract_links, visible_text, Document, FetchError, Fetcher};
use crate::config::FetchConfig;

/// Fetches real pages with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client once; it is reused for every page
    // (reqwest pools connections internally)
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        if let Ok(referrer) = HeaderValue::from_str(&config.referrer) {
            headers.insert(header::REFERER, referrer);
        } else {
            tracing::warn!(referrer = %config.referrer, "ignoring invalid referrer header");
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);

        // No timeout unless asked for: only the crawl as a whole is bounded
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        // Check the content type before downloading the body, so we don't
        // pull a whole PDF just to throw it away
        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(FetchError::UnsupportedContent {
                    content_type: content_type.to_string(),
                });
            }
        }

        // Relative links resolve against where we ended up after redirects
        let final_url = response.url().to_string();
        let html = response.text().await?;

        Ok(Document {
            text: visible_text(&html),
            links: extract_links(&html, &final_url),
        })
    }
}

// Decides whether a Content-Type header describes something with words in it
//
// Accepted: text/html, text/plain and other text/*, plus XML flavours such
// as application/xhtml+xml. Everything else (images, PDFs...) is rejected.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/") || mime == "application/xml" || mime.ends_with("+xml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // Serves exactly one canned HTTP response on a random local port
    //
    // Returns the URL to request and a handle that yields the raw request
    // the server received (lowercased, so header names compare easily)
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            // The client may hang up as soon as it has the headers (404, PDF)
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (format!("http://{}/wiki/Page", addr), handle)
    }

    fn response(status: &str, content_type: Option<&str>, body: &str) -> String {
        let content_type = content_type
            .map(|ct| format!("Content-Type: {}\r\n", ct))
            .unwrap_or_default();
        format!(
            "HTTP/1.1 {}\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_html_page_returns_text_and_links() {
        let body = r#"<html><body><p>Big <a href="/wiki/Data">data</a>s here</p></body></html>"#;
        let (url, server) = serve_once(response("200 OK", Some("text/html; charset=utf-8"), body)).await;

        let document = fetcher().fetch(&url).await.unwrap();
        server.await.unwrap();

        assert_eq!(document.text, "Big datas here");
        let base = url.trim_end_matches("/wiki/Page");
        assert_eq!(document.links, vec![format!("{}/wiki/Data", base)]);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_treated_as_html() {
        let body = "<html><body><p>plain page</p></body></html>";
        let (url, server) = serve_once(response("200 OK", None, body)).await;

        let document = fetcher().fetch(&url).await.unwrap();
        server.await.unwrap();

        assert_eq!(document.text, "plain page");
        assert!(document.links.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_http_status_error() {
        let (url, server) = serve_once(response("404 Not Found", Some("text/html"), "gone")).await;

        let err = fetcher().fetch(&url).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, FetchError::HttpStatus { status: 404 }));
    }

    #[tokio::test]
    async fn test_pdf_is_unsupported_content() {
        let (url, server) = serve_once(response("200 OK", Some("application/pdf"), "%PDF-1.4")).await;

        let err = fetcher().fetch(&url).await.unwrap_err();
        server.await.unwrap();

        match err {
            FetchError::UnsupportedContent { content_type } => {
                assert_eq!(content_type, "application/pdf")
            }
            other => panic!("expected UnsupportedContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sends_user_agent_and_referrer() {
        let config = FetchConfig {
            user_agent: "word-crawler-test/1.0".to_string(),
            referrer: "http://referrer.example/".to_string(),
            request_timeout: None,
        };
        let (url, server) = serve_once(response("200 OK", Some("text/html"), "<p>hi</p>")).await;

        HttpFetcher::new(&config).unwrap().fetch(&url).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.contains("user-agent: word-crawler-test/1.0\r\n"));
        assert!(request.contains("referer: http://referrer.example/\r\n"));
    }

    #[test]
    fn test_html_content_types_are_textual() {
        assert!(is_textual("text/html"));
        assert!(is_textual("text/html; charset=UTF-8"));
        assert!(is_textual("TEXT/HTML"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(is_textual("text/plain"));
    }

    #[test]
    fn test_binary_content_types_are_rejected() {
        assert!(!is_textual("application/pdf"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual("application/octet-stream"));
        assert!(!is_textual(""));
    }

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(HttpFetcher::new(&FetchConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported_without_a_request() {
        let fetcher = HttpFetcher::new(&FetchConfig::default()).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_fetch_errors_describe_themselves() {
        let err = FetchError::HttpStatus { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");

        let err = FetchError::UnsupportedContent {
            content_type: "application/pdf".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported content type 'application/pdf'");
    }
}
