//! DuckDuckGo HTML search provider.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::fetcher::PageFetcher;
use crate::{Engine, EngineConfig, Result, SearchError, SearchQuery, SearchResult};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo search engine, queried through its non-JavaScript HTML endpoint.
pub struct DuckDuckGo {
    config: EngineConfig,
}

impl DuckDuckGo {
    /// Creates a new DuckDuckGo engine.
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                name: "DuckDuckGo".to_string(),
                shortcut: "ddg".to_string(),
                endpoint: DDG_HTML_URL.to_string(),
            },
        }
    }

    /// Points the engine at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Engine for DuckDuckGo {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn fetch_results_page(
        &self,
        fetcher: &dyn PageFetcher,
        query: &SearchQuery,
    ) -> Result<String> {
        let form = [("q", query.text.as_str()), ("ia", "web")];
        fetcher.submit_form(&self.config.endpoint, &form).await
    }

    fn parse_results(&self, html: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let document = Html::parse_document(html);
        let result_selector = selector("div.result")?;
        let title_selector = selector("a.result__a")?;
        let url_selector = selector("a.result__url")?;
        let snippet_selector = selector(".result__snippet")?;

        let mut results = Vec::new();

        for block in document.select(&result_selector) {
            if results.len() >= max_results {
                break;
            }

            let Some(title_elem) = block.select(&title_selector).next() else {
                debug!("Skipping result block without a title link");
                continue;
            };
            let title = element_text(&title_elem);

            let href = block
                .select(&url_selector)
                .next()
                .and_then(|e| e.value().attr("href"))
                .filter(|h| !h.trim().is_empty())
                .or_else(|| title_elem.value().attr("href"))
                .unwrap_or_default();
            let url = resolve_result_url(href);

            if title.is_empty() || url.is_empty() {
                debug!("Skipping result block with empty title or URL");
                continue;
            }

            let snippet = block
                .select(&snippet_selector)
                .next()
                .map(|e| element_text(&e))
                .unwrap_or_default();

            results.push(SearchResult::new(title, url, snippet));
        }

        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SearchError::Parse(format!("Failed to parse selector: {:?}", e)))
}

/// Visible text of an element with whitespace runs collapsed.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turns a result `href` into an absolute target URL.
fn resolve_result_url(href: &str) -> String {
    let href = href.trim();
    if href.contains("duckduckgo.com/l/") {
        if let Some(target) = extract_redirect_url(href) {
            return target;
        }
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    href.to_string()
}

fn extract_redirect_url(url: &str) -> Option<String> {
    let start = url.find("uddg=")? + "uddg=".len();
    let encoded = &url[start..];
    let end = encoded.find('&').unwrap_or(encoded.len());
    let decoded = urlencoding::decode(&encoded[..end]).ok()?;
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.into_owned())
    }
}
