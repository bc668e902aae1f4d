pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ EvidenceScope, FetchOptions, PipelineOptions };
pub use errors::{ FactCheckError, FactCheckResult };
pub use implementations::artifacts::{ load_bundle, load_claims, ArtifactStore };
pub use implementations::claim_extractor::LLMClaimExtractor;
pub use implementations::config::FactCheckConfig;
pub use implementations::gnews::GNewsProvider;
pub use implementations::newsdata::NewsDataProvider;
pub use implementations::openai_client::OpenAiChatClient;
pub use implementations::pipeline::{ FactCheckPipeline, PipelineOutcome };
pub use implementations::query_refinement::QueryRefinementPolicy;
pub use implementations::source_fetcher::NewsSourceFetcher;
pub use implementations::verification_engine::LLMVerificationEngine;
pub use models::{
    Article,
    Fact,
    Incident,
    PipelineStage,
    Provider,
    ResultBundle,
    Verdict,
    VerdictLabel,
    Verification,
};
pub use traits::{
    ClaimExtractor,
    FactChecker,
    LlmClient,
    NewsProvider,
    SourceFetcher,
    VerificationEngine,
};
