//! Pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Configuration for a [`Searcher`](crate::Searcher).
///
/// Every knob of the pipeline lives here and is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether results are read from and written to the cache directory.
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    /// Directory holding one file per cache key.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// Timeout applied to the provider query and to every page fetch, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Provider query attempts before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between provider query attempts, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Whether linked pages are fetched to fill `content`.
    #[serde(default = "default_true")]
    pub fetch_content: bool,
    /// Maximum characters kept from a linked page.
    #[serde(default = "default_content_max_length")]
    pub content_max_length: usize,
    /// Page fetches in flight at once. 1 fetches sequentially.
    #[serde(default = "default_enrich_concurrency")]
    pub enrich_concurrency: usize,
    /// Results with a shorter snippet are dropped.
    #[serde(default = "default_min_snippet_length")]
    pub min_snippet_length: usize,
    /// Results whose host contains any of these substrings are dropped.
    #[serde(default)]
    pub exclude_domains: Vec<String>,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn default_true() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("search_cache")
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_content_max_length() -> usize {
    2_000
}

fn default_enrich_concurrency() -> usize {
    1
}

fn default_min_snippet_length() -> usize {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_dir: default_cache_dir(),
            request_timeout_ms: default_request_timeout_ms(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            fetch_content: true,
            content_max_length: default_content_max_length(),
            enrich_concurrency: default_enrich_concurrency(),
            min_snippet_length: default_min_snippet_length(),
            exclude_domains: Vec::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the result cache.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Sets the cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = millis(timeout);
        self
    }

    /// Sets the provider retry budget.
    pub fn with_retry(mut self, max_attempts: u32, delay: Duration) -> Self {
        self.max_attempts = max_attempts;
        self.retry_delay_ms = millis(delay);
        self
    }

    /// Enables or disables page content enrichment.
    pub fn with_fetch_content(mut self, enabled: bool) -> Self {
        self.fetch_content = enabled;
        self
    }

    /// Sets the maximum page excerpt length.
    pub fn with_content_max_length(mut self, max_length: usize) -> Self {
        self.content_max_length = max_length;
        self
    }

    /// Sets how many pages may be fetched concurrently.
    pub fn with_enrich_concurrency(mut self, concurrency: usize) -> Self {
        self.enrich_concurrency = concurrency;
        self
    }

    /// Sets the minimum snippet length.
    pub fn with_min_snippet_length(mut self, min_length: usize) -> Self {
        self.min_snippet_length = min_length;
        self
    }

    /// Sets the excluded domain substrings.
    pub fn with_exclude_domains(mut self, domains: Vec<String>) -> Self {
        self.exclude_domains = domains;
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Retry policy for the provider query.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SearchConfig::default();
        assert!(config.cache_enabled);
        assert_eq!(config.cache_dir, PathBuf::from("search_cache"));
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay_ms, 1_000);
        assert!(config.fetch_content);
        assert_eq!(config.content_max_length, 2_000);
        assert_eq!(config.enrich_concurrency, 1);
        assert_eq!(config.min_snippet_length, 10);
        assert!(config.exclude_domains.is_empty());
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_config_builder_chain() {
        let config = SearchConfig::new()
            .with_cache(false)
            .with_cache_dir("/tmp/sift")
            .with_timeout(Duration::from_millis(250))
            .with_retry(5, Duration::from_millis(20))
            .with_fetch_content(false)
            .with_content_max_length(100)
            .with_enrich_concurrency(4)
            .with_min_snippet_length(0)
            .with_exclude_domains(vec!["pinterest".to_string()])
            .with_user_agent("test-agent");

        assert!(!config.cache_enabled);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/sift"));
        assert_eq!(config.request_timeout_ms, 250);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_delay_ms, 20);
        assert!(!config.fetch_content);
        assert_eq!(config.content_max_length, 100);
        assert_eq!(config.enrich_concurrency, 4);
        assert_eq!(config.min_snippet_length, 0);
        assert_eq!(config.exclude_domains, vec!["pinterest"]);
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_huge_durations_saturate() {
        let config = SearchConfig::new()
            .with_timeout(Duration::MAX)
            .with_retry(1, Duration::from_secs(u64::MAX));
        assert_eq!(config.request_timeout_ms, u64::MAX);
        assert_eq!(config.retry_delay_ms, u64::MAX);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = SearchConfig::new()
            .with_retry(4, Duration::from_millis(50))
            .retry_policy();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_config_deserialization_uses_defaults() {
        let json = r#"{"cache_enabled":false,"exclude_domains":["example.com"]}"#;
        let config: SearchConfig = serde_json::from_str(json).unwrap();
        assert!(!config.cache_enabled);
        assert_eq!(config.exclude_domains, vec!["example.com"]);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.content_max_length, 2_000);
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_config_deserialization_reads_millisecond_fields() {
        let json = r#"{"request_timeout_ms":1500,"retry_delay_ms":250}"#;
        let config: SearchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(1_500));
        assert_eq!(config.retry_policy().delay(), Duration::from_millis(250));
    }
}
