use std::sync::Arc;

use async_trait::async_trait;
use log::{ error, info, warn };

use crate::config::{ EvidenceScope, PipelineOptions };
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::artifacts::ArtifactStore;
use crate::implementations::claim_extractor::LLMClaimExtractor;
use crate::implementations::config::FactCheckConfig;
use crate::implementations::openai_client::OpenAiChatClient;
use crate::implementations::source_fetcher::NewsSourceFetcher;
use crate::implementations::verification_engine::LLMVerificationEngine;
use crate::models::article::{ render_corpus, Article };
use crate::models::bundle::ResultBundle;
use crate::models::common::PipelineStage;
use crate::models::incident::{ total_facts, Incident };
use crate::models::verification::Verification;
use crate::traits::claim_extractor::ClaimExtractor;
use crate::traits::fact_checker::FactChecker;
use crate::traits::llm_client::LlmClient;
use crate::traits::source_fetcher::SourceFetcher;
use crate::traits::verification_engine::VerificationEngine;

/// Result of one run together with where it stopped
#[derive(Debug)]
pub struct PipelineOutcome {
    /// `Done` on success, `Error` otherwise
    pub final_stage: PipelineStage,
    /// Stage that was running when the run entered `Error`
    pub failed_stage: Option<PipelineStage>,
    pub error: Option<FactCheckError>,
    pub bundle: Option<ResultBundle>,
}

/// Articles fetched in stage 2, remembered per incident for scoped evidence
struct FetchedSources {
    per_incident: Vec<Vec<Article>>,
}

impl FetchedSources {
    fn pooled(&self) -> Vec<Article> {
        self.per_incident.iter().flatten().cloned().collect()
    }
}

/// Sequences extraction, fetching and verification.
///
/// Stages 1 and 2 are fail-fast: any failure ends the run with no bundle.
/// Stage 3 is fail-soft per fact (the engine substitutes a sentinel verdict)
/// but an `Err` from the engine still aborts the run.
pub struct FactCheckPipeline {
    extractor: Box<dyn ClaimExtractor>,
    fetcher: Box<dyn SourceFetcher>,
    verifier: Box<dyn VerificationEngine>,
    options: PipelineOptions,
    artifacts: Option<ArtifactStore>,
}

impl FactCheckPipeline {
    pub fn new(
        extractor: Box<dyn ClaimExtractor>,
        fetcher: Box<dyn SourceFetcher>,
        verifier: Box<dyn VerificationEngine>,
        options: PipelineOptions
    ) -> Self {
        let artifacts = if options.persist_artifacts {
            Some(ArtifactStore::new(options.output_dir.clone()))
        } else {
            None
        };
        Self {
            extractor,
            fetcher,
            verifier,
            options,
            artifacts,
        }
    }

    /// Wire up the production components; one LLM client is shared by all
    /// of them and is absent when no credentials are configured
    pub fn from_config(config: &FactCheckConfig) -> Self {
        let llm: Option<Arc<dyn LlmClient>> = OpenAiChatClient::from_config(config).map(
            |client| Arc::new(client) as Arc<dyn LlmClient>
        );
        Self::with_llm(config, llm)
    }

    /// Production components around a caller-supplied LLM client
    pub fn with_llm(config: &FactCheckConfig, llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self::new(
            Box::new(LLMClaimExtractor::from_config(config, llm.clone())),
            Box::new(NewsSourceFetcher::from_config(config, llm.clone())),
            Box::new(LLMVerificationEngine::from_config(config, llm)),
            config.pipeline.clone()
        )
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the pipeline, returning the bundle or `None` on a hard failure
    pub async fn run(&self, article_text: &str) -> Option<ResultBundle> {
        self.run_with_progress(article_text, &mut |_| {}).await.bundle
    }

    /// Run the pipeline, reporting every stage transition to `on_stage`
    pub async fn run_with_progress(
        &self,
        article_text: &str,
        on_stage: &mut (dyn FnMut(PipelineStage) + Send)
    ) -> PipelineOutcome {
        info!("--- Running Fact-Checking Pipeline ---");
        let mut stage = PipelineStage::Idle;
        on_stage(stage);

        match self.execute(article_text, &mut stage, on_stage).await {
            Ok(bundle) => {
                stage = PipelineStage::Done;
                on_stage(stage);
                info!(
                    "Pipeline completed: {} incident(s), {} article(s), {} verification(s)",
                    bundle.incidents.len(),
                    bundle.articles.len(),
                    bundle.verifications.len()
                );
                PipelineOutcome {
                    final_stage: stage,
                    failed_stage: None,
                    error: None,
                    bundle: Some(bundle),
                }
            }
            Err(e) => {
                error!("{} failed: {}", stage, e);
                let failed_stage = stage;
                on_stage(PipelineStage::Error);
                PipelineOutcome {
                    final_stage: PipelineStage::Error,
                    failed_stage: Some(failed_stage),
                    error: Some(e),
                    bundle: None,
                }
            }
        }
    }

    async fn execute(
        &self,
        article_text: &str,
        stage: &mut PipelineStage,
        on_stage: &mut (dyn FnMut(PipelineStage) + Send)
    ) -> FactCheckResult<ResultBundle> {
        *stage = stage.next();
        on_stage(*stage);
        let incidents = self.extract_claims(article_text).await?;
        self.pause().await;

        *stage = stage.next();
        on_stage(*stage);
        let sources = self.fetch_sources(&incidents).await?;
        self.pause().await;

        *stage = stage.next();
        on_stage(*stage);
        let verifications = self.verify_facts(&incidents, &sources).await?;

        Ok(ResultBundle::new(incidents, sources.pooled(), verifications))
    }

    async fn extract_claims(&self, article_text: &str) -> FactCheckResult<Vec<Incident>> {
        if article_text.trim().is_empty() {
            return Err(FactCheckError::EmptyInput("article text is empty".to_string()));
        }

        let incidents = match self.extractor.extract(article_text).await {
            Some(incidents) if !incidents.is_empty() => incidents,
            _ => {
                return Err(FactCheckError::ExtractionError("No incidents extracted".to_string()));
            }
        };

        info!(
            "Stage 1: extracted {} incident(s) with {} fact(s)",
            incidents.len(),
            total_facts(&incidents)
        );
        if let Some(store) = &self.artifacts {
            if let Err(e) = store.save_claims(&incidents) {
                error!("Failed to save claims artifact: {}", e);
            }
        }
        Ok(incidents)
    }

    async fn fetch_sources(&self, incidents: &[Incident]) -> FactCheckResult<FetchedSources> {
        let language = self.options.language.as_deref();
        let country = self.options.country.as_deref();
        let mut per_incident = Vec::with_capacity(incidents.len());

        for incident in incidents {
            if !incident.has_search_statement() {
                warn!("Incident '{}' has no search statement, skipping fetch", incident.incident_summary);
                per_incident.push(Vec::new());
                continue;
            }
            let articles = self.fetcher.fetch_all(&incident.search_statement, language, country).await?;
            per_incident.push(articles);
        }

        let sources = FetchedSources { per_incident };
        let pooled = sources.pooled();
        info!("Stage 2: fetched {} article(s)", pooled.len());
        if pooled.is_empty() {
            warn!("No articles fetched; verdicts will lack evidence");
        }
        if let Some(store) = &self.artifacts {
            if let Err(e) = store.save_articles(&pooled) {
                error!("Failed to save articles artifact: {}", e);
            }
        }
        Ok(sources)
    }

    async fn verify_facts(
        &self,
        incidents: &[Incident],
        sources: &FetchedSources
    ) -> FactCheckResult<Vec<Verification>> {
        let pooled_corpus = match self.options.evidence_scope {
            EvidenceScope::Pooled => Some(render_corpus(&sources.pooled())),
            EvidenceScope::PerIncident => None,
        };

        let mut verifications = Vec::with_capacity(total_facts(incidents));
        for (incident, incident_articles) in incidents.iter().zip(&sources.per_incident) {
            let scoped_corpus;
            let corpus = match &pooled_corpus {
                Some(corpus) => corpus.as_str(),
                None => {
                    scoped_corpus = render_corpus(incident_articles);
                    scoped_corpus.as_str()
                }
            };

            for fact in &incident.facts {
                let verdict = self.verifier.verify(&fact.statement, corpus).await?;
                verifications.push(
                    Verification::new(fact.statement.clone(), incident.search_statement.clone(), verdict)
                );
            }
        }

        let failed = verifications
            .iter()
            .filter(|v| v.is_error())
            .count();
        if failed > 0 {
            warn!("Stage 3: {} of {} verification(s) failed", failed, verifications.len());
        }
        info!("Stage 3: produced {} verification(s)", verifications.len());
        if let Some(store) = &self.artifacts {
            if let Err(e) = store.save_verifications(&verifications) {
                error!("Failed to save verifications artifact: {}", e);
            }
        }
        Ok(verifications)
    }

    async fn pause(&self) {
        let pause = self.options.stage_pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }
}

#[async_trait]
impl FactChecker for FactCheckPipeline {
    async fn run(&self, article_text: &str) -> Option<ResultBundle> {
        FactCheckPipeline::run(self, article_text).await
    }
}
