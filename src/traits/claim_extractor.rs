use async_trait::async_trait;

use crate::models::incident::Incident;

/// Turns raw article text into structured incidents and facts
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    /// Extract incidents from an article.
    ///
    /// `None` means extraction failed (empty input, unavailable client,
    /// upstream or decode error); the cause is logged, never returned.
    /// `Some(vec![])` means the model answered without a usable
    /// `incidents` array. Callers treat both as failure.
    async fn extract(&self, article_text: &str) -> Option<Vec<Incident>>;
}
