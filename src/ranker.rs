//! Relevance ranking.

use crate::{SearchQuery, SearchResult};

/// Field weights used by the relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    /// Weight of a term occurrence in the title.
    pub title: f64,
    /// Weight of a term occurrence in the snippet.
    pub snippet: f64,
    /// Weight of a term occurrence in the page content.
    pub content: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 2.0,
            snippet: 1.0,
            content: 0.5,
        }
    }
}

/// Reorders results by weighted query-term frequency.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: FieldWeights,
}

impl Ranker {
    /// Creates a ranker with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ranker with custom weights.
    pub fn with_weights(weights: FieldWeights) -> Self {
        Self { weights }
    }

    /// Scores a result against lowercased query terms.
    ///
    /// Occurrences are counted as non-overlapping substrings of each
    /// lowercased field, so "cache" also counts inside "caches".
    pub fn score(&self, result: &SearchResult, terms: &[String]) -> f64 {
        let title = result.title.to_lowercase();
        let snippet = result.snippet.to_lowercase();
        let content = result.content.to_lowercase();

        terms
            .iter()
            .map(|term| {
                let term = term.as_str();
                title.matches(term).count() as f64 * self.weights.title
                    + snippet.matches(term).count() as f64 * self.weights.snippet
                    + content.matches(term).count() as f64 * self.weights.content
            })
            .sum()
    }

    /// Sorts results by descending score. Equal scores keep their input order.
    pub fn rank(&self, results: Vec<SearchResult>, query: &SearchQuery) -> Vec<SearchResult> {
        let terms = query.terms();
        let mut scored: Vec<(f64, SearchResult)> = results
            .into_iter()
            .map(|r| (self.score(&r, &terms), r))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        scored.into_iter().map(|(_, r)| r).collect()
    }
}
