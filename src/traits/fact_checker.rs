use async_trait::async_trait;

use crate::models::bundle::ResultBundle;

/// Caller-facing entry point of the fact-checking system
#[async_trait]
pub trait FactChecker: Send + Sync {
    /// Run the whole pipeline; `None` when any fail-fast stage fails.
    async fn run(&self, article_text: &str) -> Option<ResultBundle>;
}
