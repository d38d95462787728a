//! Search orchestration.
//!
//! A search runs through cache lookup, provider query (with retry),
//! result extraction, page enrichment, filtering, ranking and cache write.
//! Only exhausting the provider retry budget fails a search; every other
//! stage degrades in place.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::engines::DuckDuckGo;
use crate::extract::ContentExtractor;
use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::filter::ResultFilter;
use crate::ranker::Ranker;
use crate::{
    Engine, Result, SearchConfig, SearchError, SearchQuery, SearchResponse, SearchResult,
};

/// Search pipeline over a single provider.
///
/// Holds no per-request state, so one instance can be shared behind an
/// `Arc` by concurrent callers.
pub struct Searcher {
    engine: Box<dyn Engine>,
    fetcher: Arc<dyn PageFetcher>,
    cache: CacheStore,
    extractor: ContentExtractor,
    filter: ResultFilter,
    ranker: Ranker,
    config: SearchConfig,
}

impl Searcher {
    /// Creates a DuckDuckGo searcher that talks HTTP through reqwest.
    pub fn new(config: SearchConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent, config.timeout())?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a DuckDuckGo searcher over a custom transport.
    pub fn with_fetcher(config: SearchConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let cache = CacheStore::with_enabled(config.cache_dir.clone(), config.cache_enabled);
        let extractor = ContentExtractor::new(Arc::clone(&fetcher))
            .with_max_length(config.content_max_length)
            .with_timeout(config.timeout());
        let filter = ResultFilter::new(config.min_snippet_length, config.exclude_domains.clone());

        Self {
            engine: Box::new(DuckDuckGo::new()),
            fetcher,
            cache,
            extractor,
            filter,
            ranker: Ranker::new(),
            config,
        }
    }

    /// Replaces the search provider.
    pub fn with_engine<E: Engine + 'static>(mut self, engine: E) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the result cache.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Returns the provider name.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Runs a search and returns the ranked results.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<SearchResult>> {
        query.validate()?;

        let start = Instant::now();
        let key = CacheKey::new(&query.text, query.max_results);

        if let Some(cached) = self.cache.get(&key).await {
            if !cached.is_empty() {
                debug!("Cache hit for '{}' ({})", query.text, key);
                return Ok(cached);
            }
        }
        debug!("Cache miss for '{}' ({})", query.text, key);

        let html = self.query_provider(&query).await?;
        let results = self.engine.parse_results(&html, query.max_results)?;
        debug!("{} returned {} results", self.engine.name(), results.len());

        let results = self.enrich(results).await;
        let results = self.filter.apply(results);
        let results = self.ranker.rank(results, &query);

        if let Err(e) = self.cache.put(&key, &results).await {
            warn!("Failed to cache results for '{}': {}", query.text, e);
        }

        info!(
            "Search '{}' finished with {} results in {}ms",
            query.text,
            results.len(),
            start.elapsed().as_millis()
        );

        Ok(results)
    }

    /// Runs a search and wraps the results for the service boundary.
    pub async fn search_response(&self, query: SearchQuery) -> Result<SearchResponse> {
        let text = query.text.clone();
        let results = self.search(query).await?;
        Ok(SearchResponse::new(text, results))
    }

    /// Fetches the provider result page, retrying within the configured budget.
    async fn query_provider(&self, query: &SearchQuery) -> Result<String> {
        let engine = self.engine.as_ref();
        let fetcher = self.fetcher.as_ref();
        let timeout = self.config.timeout();

        self.config
            .retry_policy()
            .run(move || async move {
                match tokio::time::timeout(timeout, engine.fetch_results_page(fetcher, query)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(SearchError::Timeout),
                }
            })
            .await
            .map_err(|(attempts, e)| SearchError::ProviderUnavailable {
                attempts,
                source: Box::new(e),
            })
    }

    /// Fills `content` for every result. Output order matches input order
    /// whatever the configured concurrency.
    async fn enrich(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        if !self.config.fetch_content {
            return results;
        }

        let extractor = &self.extractor;
        stream::iter(results)
            .map(move |mut result| async move {
                result.content = extractor.extract(&result.url).await;
                result
            })
            .buffered(self.config.enrich_concurrency.max(1))
            .collect::<Vec<_>>()
            .await
    }
}
