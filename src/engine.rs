//! Search provider trait and configuration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fetcher::PageFetcher;
use crate::{Result, SearchQuery, SearchResult};

/// Configuration for a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Display name of the engine.
    pub name: String,
    /// Short identifier (e.g., "ddg" for DuckDuckGo).
    pub shortcut: String,
    /// URL the query is sent to.
    pub endpoint: String,
}

/// Trait for implementing search providers.
///
/// A provider knows how to send a query and how to pull result records out
/// of the page it answers with. Transport concerns (headers, timeouts) stay
/// with the [`PageFetcher`].
#[async_trait]
pub trait Engine: Send + Sync {
    /// Returns the engine configuration.
    fn config(&self) -> &EngineConfig;

    /// Sends the query and returns the raw result page.
    async fn fetch_results_page(
        &self,
        fetcher: &dyn PageFetcher,
        query: &SearchQuery,
    ) -> Result<String>;

    /// Extracts at most `max_results` records from a result page, in page order.
    ///
    /// Blocks that do not have the expected shape are skipped.
    fn parse_results(&self, html: &str, max_results: usize) -> Result<Vec<SearchResult>>;

    /// Returns the engine name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Returns the engine shortcut.
    fn shortcut(&self) -> &str {
        &self.config().shortcut
    }
}
