use async_trait::async_trait;

use crate::errors::FactCheckResult;
use crate::models::article::Article;

/// Retrieves candidate evidence articles for a search query
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Query every provider and concatenate their results.
    ///
    /// `None` for language or country selects the fetcher's defaults.
    ///
    /// Provider-level failures are absorbed into empty results; an `Err`
    /// here means the fetch as a whole could not run.
    async fn fetch_all(
        &self,
        query: &str,
        language: Option<&str>,
        country: Option<&str>
    ) -> FactCheckResult<Vec<Article>>;
}
