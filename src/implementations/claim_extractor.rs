use std::sync::Arc;

use async_trait::async_trait;
use log::{ debug, error, info, warn };
use thiserror::Error;

use crate::implementations::config::FactCheckConfig;
use crate::models::incident::{ Fact, Incident };
use crate::traits::claim_extractor::ClaimExtractor;
use crate::traits::llm_client::{ ChatMessage, ChatRequest, LlmClient, LlmError, ResponseFormat };

const EXTRACTION_SYSTEM_PROMPT: &str =
    r#"
Read the following article and identify distinct substories or incidents within it. Each substory should represent only one coherent incident, even if it contains multiple factual claims.

For each identified incident, extract and return the information in the following format:

[
  {
    "incident_summary": "<A concise summary of the incident>",
    "search_statement": "<Multiple distinct natural language search queries about the incident, joined using ' OR '>",
    "facts": [
      {
        "statement": "<A factual claim related to the incident>",
        "date": "<Date if mentioned, else null>",
        "place": "<Place if mentioned, else null>"
      }
    ]
  }
]

Guidelines:
- A "fact" is a statement that can be validated as true, false, or partially true using external sources.
- Each group of facts must relate to only one incident.
- Do not group together claims that describe different events.
- For the "search_statement":
  - Generate 2 to 4 distinct natural language search queries that someone might use to look up the incident online.
  - Ensure that these queries do not repeat phrasing and each focuses on a slightly different angle or keyword set relevant to the same incident.
  - Concatenate these search queries using ` OR ` (capitalized, with spaces) so they can be used directly in a search API.
- If a fact does not mention a date or place, return those fields as `null`.
"#;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Article text is empty")] EmptyInputError,

    #[error("LLM client is not initialized")] ClientUnavailable,

    #[error(transparent)] Llm(#[from] LlmError),

    #[error("Failed to decode JSON from LLM: {0}")] Decode(#[from] serde_json::Error),
}

/// Claim extractor backed by a single deterministic LLM call
#[derive(Clone)]
pub struct LLMClaimExtractor {
    llm: Option<Arc<dyn LlmClient>>,
    model: String,
    max_tokens: usize,
}

impl LLMClaimExtractor {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, model: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            llm,
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(config: &FactCheckConfig, llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self::new(llm, config.llm_model(), config.llm_api.extraction_max_tokens)
    }

    fn build_request(&self, article_text: &str) -> ChatRequest {
        let user_prompt = format!(
            "Article Text:\n---\n{}\n---\n\n\
             Return a JSON object with an \"incidents\" key, where the value is a list of incident objects.",
            article_text
        );

        ChatRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(EXTRACTION_SYSTEM_PROMPT.trim()),
                ChatMessage::user(user_prompt)
            ],
            0.0
        )
            .with_max_tokens(self.max_tokens)
            .with_response_format(ResponseFormat::JsonObject)
    }

    /// Extraction with the failure cause kept, for callers that want it
    pub async fn try_extract(&self, article_text: &str) -> Result<Vec<Incident>, ExtractionError> {
        if article_text.trim().is_empty() {
            return Err(ExtractionError::EmptyInputError);
        }
        let llm = self.llm.as_ref().ok_or(ExtractionError::ClientUnavailable)?;

        info!("Using model for incident extraction: {}", self.model);
        let request = self.build_request(article_text);
        let content = llm.complete(&request).await?;
        debug!("Extraction response length: {} characters", content.len());

        parse_incidents(&content)
    }
}

/// Decode the `{"incidents": [...]}` envelope.
///
/// A missing key or a non-array value yields an empty list; malformed JSON
/// is an error.
pub fn parse_incidents(content: &str) -> Result<Vec<Incident>, ExtractionError> {
    let parsed: serde_json::Value = serde_json::from_str(content.trim())?;

    match parsed.get("incidents") {
        Some(serde_json::Value::Array(items)) => {
            let mut incidents = items
                .iter()
                .cloned()
                .map(serde_json::from_value::<Incident>)
                .collect::<Result<Vec<_>, _>>()?;
            for incident in &mut incidents {
                let before = incident.facts.len();
                incident.facts.retain(Fact::has_statement);
                if incident.facts.len() < before {
                    warn!(
                        "Skipped {} fact(s) without a statement in '{}'.",
                        before - incident.facts.len(),
                        incident.incident_summary
                    );
                }
            }
            info!("Extracted {} incident(s) from article.", incidents.len());
            Ok(incidents)
        }
        _ => {
            warn!("LLM response missing 'incidents' key or value is not a list.");
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl ClaimExtractor for LLMClaimExtractor {
    async fn extract(&self, article_text: &str) -> Option<Vec<Incident>> {
        match self.try_extract(article_text).await {
            Ok(incidents) => Some(incidents),
            Err(ExtractionError::EmptyInputError) => {
                warn!("Empty article text provided.");
                None
            }
            Err(ExtractionError::Llm(e)) => {
                error!("LLM API error during incident extraction: {}", e);
                None
            }
            Err(e) => {
                error!("Incident extraction failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_non_array_incidents_yield_empty() {
        assert!(parse_incidents(r#"{"claims": []}"#).unwrap().is_empty());
        assert!(parse_incidents(r#"{"incidents": {"a": 1}}"#).unwrap().is_empty());
    }

    #[test]
    fn facts_without_statement_are_skipped() {
        let content =
            r#"{"incidents": [{
            "incident_summary": "Flood in Assam",
            "search_statement": "Assam flood OR Brahmaputra flooding",
            "facts": [
                {"statement": null, "date": "2024-07-01", "place": null},
                {"statement": "Flood waters displaced thousands", "date": null, "place": "Assam"}
            ]
        }]}"#;
        let incidents = parse_incidents(content).unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].facts.len(), 1);
        assert_eq!(incidents[0].facts[0].statement, "Flood waters displaced thousands");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(parse_incidents("{incidents: ["), Err(ExtractionError::Decode(_))));
    }

    #[test]
    fn request_is_deterministic_json_mode() {
        let extractor = LLMClaimExtractor::new(None, "gpt-4o-mini", 2500);
        let request = extractor.build_request("Some article");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, Some(2500));
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        assert_eq!(request.messages.len(), 2);
        assert!(request.messages[1].content.contains("Some article"));
    }
}
