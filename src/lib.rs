//! # ddg-sift
//!
//! Cached web search over DuckDuckGo's HTML endpoint, producing clean,
//! relevance-ordered results for retrieval pipelines.
//!
//! A search goes through:
//!
//! - Cache lookup keyed by a digest of the query text and result limit
//! - Provider query with fixed-delay retry
//! - Result extraction from the provider markup
//! - Page enrichment: the visible text of each linked page
//! - Filtering by snippet length and excluded domains
//! - Ranking by weighted query-term frequency
//! - Cache write
//!
//! ## Example
//!
//! ```rust,no_run
//! use ddg_sift::{SearchConfig, SearchQuery, Searcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let searcher = Searcher::new(SearchConfig::default())?;
//!
//!     let query = SearchQuery::new("rust programming").with_max_results(5);
//!     let results = searcher.search(query).await?;
//!
//!     for result in &results {
//!         println!("{}: {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod engine;
mod error;
mod query;
mod result;
mod search;

pub mod cache;
pub mod engines;
pub mod extract;
pub mod fetcher;
pub mod fetcher_http;
pub mod filter;
pub mod ranker;
pub mod retry;
pub mod server;

pub use cache::{CacheKey, CacheStore};
pub use config::SearchConfig;
pub use engine::{Engine, EngineConfig};
pub use error::{Result, SearchError};
pub use extract::ContentExtractor;
pub use fetcher::PageFetcher;
pub use fetcher_http::HttpFetcher;
pub use filter::ResultFilter;
pub use query::{SearchQuery, DEFAULT_MAX_RESULTS};
pub use ranker::Ranker;
pub use result::{SearchResponse, SearchResult};
pub use retry::RetryPolicy;
pub use search::Searcher;
