use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, error, info };

use crate::errors::FactCheckResult;
use crate::implementations::config::FactCheckConfig;
use crate::models::verification::VERIFICATION_ERROR_SENTINEL;
use crate::traits::llm_client::{ ChatMessage, ChatRequest, LlmClient };
use crate::traits::verification_engine::VerificationEngine;

const EMPTY_CORPUS_NOTICE: &str = "No articles were found for this claim.";

/// Verification engine that asks the LLM for a formatted verdict per fact
#[derive(Clone)]
pub struct LLMVerificationEngine {
    llm: Option<Arc<dyn LlmClient>>,
    model: String,
    temperature: f32,
}

impl LLMVerificationEngine {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature,
        }
    }

    pub fn from_config(config: &FactCheckConfig, llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self::new(llm, config.llm_model(), config.llm_api.verification_temperature)
    }

    fn build_prompt(fact_statement: &str, article_corpus: &str) -> String {
        let articles = if article_corpus.trim().is_empty() {
            EMPTY_CORPUS_NOTICE
        } else {
            article_corpus
        };

        format!(
            r#"You are a fact verification assistant.

Fact to verify:
"{fact}"

Below are the contents of multiple news articles. Each article includes its title, description, and the source name.

Articles:
{articles}

Based on the articles, determine if the fact is:
- Proved (if the fact's core claim is supported clearly by any article),
- Refuted (if any article directly contradicts the fact),
- Unclear (if articles do not give enough information).

Your response should include:
1. Short Reasoning (2-3 lines)
2. Final Verdict: Proved / Refuted / Unclear
3. Supporting Source(s): Name the news source(s) you used to justify the verdict, if any. If verdict is Unclear, write "None".
4. Confidence Score: a number from 0 to 100, followed by a one-line justification.

Respond in this exact format:
Reasoning: ...

Verdict: ...

Sources: ...

Confidence Score: ..."#,
            fact = fact_statement,
            articles = articles
        )
    }
}

#[async_trait]
impl VerificationEngine for LLMVerificationEngine {
    async fn verify(&self, fact_statement: &str, article_corpus: &str) -> FactCheckResult<String> {
        let llm = match &self.llm {
            Some(llm) => llm,
            None => {
                error!("LLM client is not initialized, cannot verify fact");
                return Ok(VERIFICATION_ERROR_SENTINEL.to_string());
            }
        };

        let prompt = Self::build_prompt(fact_statement, article_corpus);
        debug!("Verification prompt length: {} characters", prompt.len());
        let request = ChatRequest::new(
            self.model.clone(),
            vec![ChatMessage::user(prompt)],
            self.temperature
        );

        match llm.complete(&request).await {
            Ok(content) => {
                info!("Verified fact: {}", fact_statement);
                Ok(content.trim().to_string())
            }
            Err(e) => {
                error!("OpenAI API call failed: {}", e);
                Ok(VERIFICATION_ERROR_SENTINEL.to_string())
            }
        }
    }
}
