//! Plain-text extraction from result pages.

use std::sync::Arc;
use std::time::Duration;

use scraper::{Html, Node};
use tracing::debug;

use crate::fetcher::PageFetcher;

/// Elements whose text is never shown to a reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Default number of characters kept from a page.
pub const DEFAULT_MAX_LENGTH: usize = 2_000;

/// Extracts the visible text of an HTML document.
///
/// Text inside script, style, noscript and template elements is dropped,
/// whitespace runs collapse to single spaces, and the result is cut to
/// `max_length` characters.
pub fn page_text(html: &str, max_length: usize) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }

    truncate_chars(&words.join(" "), max_length)
}

fn truncate_chars(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Fetches result pages and reduces them to bounded plain-text excerpts.
///
/// Failures never escape: an unreachable, slow or non-text page yields an
/// empty string.
#[derive(Clone)]
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    max_length: usize,
    timeout: Duration,
}

impl ContentExtractor {
    /// Creates an extractor with the default excerpt length and a 10 second timeout.
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            max_length: DEFAULT_MAX_LENGTH,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the maximum excerpt length in characters.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Sets the per-page timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the maximum excerpt length.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Fetches `url` and returns its visible text, or an empty string on any failure.
    pub async fn extract(&self, url: &str) -> String {
        match tokio::time::timeout(self.timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(html)) => page_text(&html, self.max_length),
            Ok(Err(e)) => {
                debug!("Content fetch failed for {}: {}", url, e);
                String::new()
            }
            Err(_) => {
                debug!("Content fetch timed out for {}", url);
                String::new()
            }
        }
    }
}
