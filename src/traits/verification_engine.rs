use async_trait::async_trait;

use crate::errors::FactCheckResult;

/// Adjudicates one fact against a corpus of article snippets
#[async_trait]
pub trait VerificationEngine: Send + Sync {
    /// Produce the verdict text for `fact_statement`.
    ///
    /// Per-fact upstream failures are returned as a sentinel verdict, not as
    /// an `Err`; an `Err` aborts the verification stage.
    async fn verify(&self, fact_statement: &str, article_corpus: &str) -> FactCheckResult<String>;
}
