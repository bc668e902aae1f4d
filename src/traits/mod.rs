pub mod llm_client;
pub mod news_provider;
pub mod claim_extractor;
pub mod source_fetcher;
pub mod verification_engine;
pub mod fact_checker;

// Re-export traits
pub use llm_client::{ ChatMessage, ChatRequest, LlmClient, LlmError, ResponseFormat };
pub use news_provider::{ NewsProvider, ProviderError };
pub use claim_extractor::ClaimExtractor;
pub use source_fetcher::SourceFetcher;
pub use verification_engine::VerificationEngine;
pub use fact_checker::FactChecker;
