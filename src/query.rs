//! Search query representation.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Number of results returned when the caller does not ask for a specific count.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// A search query: the text sent to the provider and the result-count limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The search terms.
    pub text: String,
    /// Maximum number of results to extract from the provider page.
    pub max_results: usize,
}

impl SearchQuery {
    /// Creates a new search query with the default result limit.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Checks that the query is usable by the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(SearchError::InvalidQuery("Query cannot be empty".into()));
        }
        if self.max_results == 0 {
            return Err(SearchError::InvalidQuery(
                "max_results must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Lowercased, deduplicated query terms in first-seen order.
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for word in self.text.to_lowercase().split_whitespace() {
            if !terms.iter().any(|t| t == word) {
                terms.push(word.to_string());
            }
        }
        terms
    }
}
