//! In-memory stand-ins for the LLM and the news providers.

use std::collections::{ HashMap, VecDeque };
use std::sync::{ Arc, Mutex };

use async_trait::async_trait;

use crate::config::PipelineOptions;
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::models::article::Article;
use crate::models::common::Provider;
use crate::models::incident::{ Fact, Incident };
use crate::traits::claim_extractor::ClaimExtractor;
use crate::traits::llm_client::{ ChatRequest, LlmClient, LlmError };
use crate::traits::news_provider::{ NewsProvider, ProviderError };
use crate::traits::source_fetcher::SourceFetcher;
use crate::traits::verification_engine::VerificationEngine;

type Handler = Box<dyn Fn(&ChatRequest) -> Result<String, LlmError> + Send + Sync>;

pub const PROVED_VERDICT: &str =
    "Reasoning: The articles report the event directly.\n\nVerdict: Proved\n\nSources: The Hindu\n\nConfidence Score: 85 - consistent reports";

pub const UNCLEAR_VERDICT: &str =
    "Reasoning: No article mentions the claim.\n\nVerdict: Unclear\n\nSources: None\n\nConfidence Score: 10 - no evidence";

/// LLM client that records every request and answers through a handler
pub struct FixtureLlm {
    handler: Handler,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FixtureLlm {
    pub fn new<F>(handler: F) -> Self
        where F: Fn(&ChatRequest) -> Result<String, LlmError> + Send + Sync + 'static
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Same reply to every request
    pub fn replying(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// Replies handed out in order; an exhausted queue answers `EmptyResponse`
    pub fn with_replies(replies: &[&str]) -> Self {
        let queue: Mutex<VecDeque<String>> = Mutex::new(
            replies
                .iter()
                .map(|r| r.to_string())
                .collect()
        );
        Self::new(move |_| queue.lock().unwrap().pop_front().ok_or(LlmError::EmptyResponse))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(LlmError::NetworkError("connection refused".to_string())))
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for FixtureLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

/// Provider that replays queued responses and records the queries it saw.
///
/// Once the queue is empty every search returns no articles.
pub struct FixtureProvider {
    provider: Provider,
    configured: bool,
    responses: Mutex<VecDeque<Result<Vec<Article>, ProviderError>>>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FixtureProvider {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            configured: true,
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider without an API key
    pub fn unconfigured(provider: Provider) -> Self {
        Self { configured: false, ..Self::new(provider) }
    }

    pub fn then_articles(self, articles: Vec<Article>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(articles));
        self
    }

    pub fn then_error(self, error: ProviderError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _, _)| query.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl NewsProvider for FixtureProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        country: &str
    ) -> Result<Vec<Article>, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), language.to_string(), country.to_string()));
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Extractor returning a fixed answer
pub struct StaticExtractor(pub Option<Vec<Incident>>);

#[async_trait]
impl ClaimExtractor for StaticExtractor {
    async fn extract(&self, _article_text: &str) -> Option<Vec<Incident>> {
        self.0.clone()
    }
}

/// Fetcher keyed by query; unknown queries return nothing
#[derive(Default)]
pub struct MapFetcher {
    results: HashMap<String, Vec<Article>>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl MapFetcher {
    /// A fetcher whose every call fails as a whole
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn with(mut self, query: &str, articles: Vec<Article>) -> Self {
        self.results.insert(query.to_string(), articles);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceFetcher for MapFetcher {
    async fn fetch_all(
        &self,
        query: &str,
        _language: Option<&str>,
        _country: Option<&str>
    ) -> FactCheckResult<Vec<Article>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(FactCheckError::FetchError("provider pool unavailable".to_string()));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

/// Verifier that records (fact, corpus) pairs and answers with a fixed verdict
pub struct RecordingVerifier {
    verdict: FactCheckResult<String>,
    seen: Mutex<Vec<(String, String)>>,
}

impl RecordingVerifier {
    pub fn answering(verdict: &str) -> Self {
        Self { verdict: Ok(verdict.to_string()), seen: Mutex::new(Vec::new()) }
    }

    pub fn erroring() -> Self {
        Self {
            verdict: Err(FactCheckError::VerificationError("engine offline".to_string())),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<(String, String)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationEngine for RecordingVerifier {
    async fn verify(&self, fact_statement: &str, article_corpus: &str) -> FactCheckResult<String> {
        self.seen.lock().unwrap().push((fact_statement.to_string(), article_corpus.to_string()));
        match &self.verdict {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(FactCheckError::VerificationError(e.to_string())),
        }
    }
}

// Shared handles so a test can inspect a stub after the pipeline has taken it

#[async_trait]
impl SourceFetcher for Arc<MapFetcher> {
    async fn fetch_all(
        &self,
        query: &str,
        language: Option<&str>,
        country: Option<&str>
    ) -> FactCheckResult<Vec<Article>> {
        (**self).fetch_all(query, language, country).await
    }
}

#[async_trait]
impl VerificationEngine for Arc<RecordingVerifier> {
    async fn verify(&self, fact_statement: &str, article_corpus: &str) -> FactCheckResult<String> {
        (**self).verify(fact_statement, article_corpus).await
    }
}

pub fn article(title: &str, source: &str, provider: Provider) -> Article {
    Article {
        article_id: None,
        title: title.to_string(),
        description: format!("{} (details)", title),
        content: None,
        source_name: source.to_string(),
        provider,
    }
}

pub fn incident(summary: &str, search: &str, facts: &[&str]) -> Incident {
    Incident {
        incident_summary: summary.to_string(),
        search_statement: search.to_string(),
        facts: facts
            .iter()
            .map(|statement| Fact {
                statement: statement.to_string(),
                date: None,
                place: None,
            })
            .collect(),
    }
}

/// Options with no pauses and no files written
pub fn quiet_options() -> PipelineOptions {
    PipelineOptions {
        stage_pause_ms: 0,
        persist_artifacts: false,
        ..PipelineOptions::default()
    }
}
