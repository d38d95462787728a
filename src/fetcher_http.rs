//! HTTP-based page fetcher using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use tracing::debug;

use crate::fetcher::PageFetcher;
use crate::{Result, SearchError};

/// A page fetcher that uses plain HTTP requests via reqwest.
///
/// The client is shared configuration only (User-Agent and timeout), so a
/// single instance can serve concurrent searches.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher` with the given User-Agent and per-request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self { client })
    }

    /// Creates an `HttpFetcher` with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read_text(url: &str, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(SearchError::UnsupportedContent {
                    content_type: content_type.to_string(),
                    url: url.to_string(),
                });
            }
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_text(url, response).await
    }

    async fn submit_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_text(url, response).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::Http(e)
    }
}

/// Whether a Content-Type header names something we can read as markup or text.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xhtml+xml"
        || mime == "application/xml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_new() {
        let fetcher = HttpFetcher::new("test-agent", Duration::from_secs(10));
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_http_fetcher_with_client() {
        let client = Client::builder().user_agent("test-agent").build().unwrap();
        let _fetcher = HttpFetcher::with_client(client);
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html"));
        assert!(is_textual("text/html; charset=utf-8"));
        assert!(is_textual("TEXT/PLAIN"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(!is_textual("application/pdf"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual("application/octet-stream"));
    }
}
