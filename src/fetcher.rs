//! Page fetcher abstraction for talking to the provider and to result pages.

use async_trait::async_trait;

use crate::Result;

/// Trait for the HTTP transport used by the pipeline.
///
/// Implementations carry their own headers and timeouts; both calls return
/// the response body as text or an error for any network failure, timeout
/// or non-success status.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of the given URL with a GET request.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Submits a form with a POST request and returns the response body.
    async fn submit_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String>;
}
