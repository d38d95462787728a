//! Removal of low-information and unwanted results.

use crate::SearchResult;

/// Drops results with short snippets or hosts on a denylist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFilter {
    min_snippet_length: usize,
    exclude_domains: Vec<String>,
}

impl Default for ResultFilter {
    fn default() -> Self {
        Self::new(10, Vec::new())
    }
}

impl ResultFilter {
    /// Creates a filter. Domain patterns are matched case-insensitively as
    /// substrings of the result host; blank patterns are ignored.
    pub fn new(min_snippet_length: usize, exclude_domains: Vec<String>) -> Self {
        let exclude_domains = exclude_domains
            .into_iter()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            min_snippet_length,
            exclude_domains,
        }
    }

    /// Minimum snippet length in characters.
    pub fn min_snippet_length(&self) -> usize {
        self.min_snippet_length
    }

    /// Normalized domain patterns.
    pub fn exclude_domains(&self) -> &[String] {
        &self.exclude_domains
    }

    /// Returns whether a single result passes the filter.
    pub fn accepts(&self, result: &SearchResult) -> bool {
        if result.snippet.chars().count() < self.min_snippet_length {
            return false;
        }
        let host = result.host();
        !self
            .exclude_domains
            .iter()
            .any(|pattern| host.contains(pattern.as_str()))
    }

    /// Keeps the accepted results, preserving order.
    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        results.into_iter().filter(|r| self.accepts(r)).collect()
    }
}
