//! Search result types.

use serde::{Deserialize, Serialize};

/// A single search result.
///
/// Every field is always present. `content` stays empty until the linked
/// page has been fetched, and remains empty when that fetch fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Description shown by the provider.
    pub snippet: String,
    /// Plain-text excerpt of the linked page.
    #[serde(default)]
    pub content: String,
}

impl SearchResult {
    /// Creates a result without page content.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            content: String::new(),
        }
    }

    /// Sets the page content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Host part of the URL, or an empty string when the URL does not parse.
    pub fn host(&self) -> String {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_default()
    }
}

/// Response envelope handed to callers of the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query text as received.
    pub query: String,
    /// Number of results.
    pub count: usize,
    /// Ranked results.
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Wraps a ranked result list.
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            query: query.into(),
            count: results.len(),
            results,
        }
    }
}
