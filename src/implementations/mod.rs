pub mod config;
pub mod openai_client;
pub mod claim_extractor;
pub mod newsdata;
pub mod gnews;
pub mod query_refinement;
pub mod source_fetcher;
pub mod verification_engine;
pub mod artifacts;
pub mod pipeline;
