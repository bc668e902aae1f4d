use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, error, info, warn };
use serde::Deserialize;

use crate::implementations::config::FactCheckConfig;
use crate::traits::llm_client::{ ChatMessage, ChatRequest, LlmClient, LlmError };

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

/// `LlmClient` for OpenAI-compatible chat-completions endpoints
///
/// # API Keys
/// The key comes from `llm_api.api_key` in the config file or, when that is
/// unset, from the `OPENAI_API_KEY` environment variable (a `.env` file is
/// honoured). Without a key [`OpenAiChatClient::from_config`] returns `None`
/// and every LLM-backed stage is short-circuited.
#[derive(Clone)]
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    api_key: String,
    api_endpoint: String,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: impl Into<String>,
        api_endpoint: impl Into<String>,
        timeout: Duration
    ) -> Result<Self, LlmError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            api_endpoint: api_endpoint.into(),
        })
    }

    /// Build the client from configuration; fails closed with `None`
    pub fn from_config(config: &FactCheckConfig) -> Option<Self> {
        match Self::try_from_config(config) {
            Ok(client) => {
                info!("Initialized LLM client for {}", config.llm_endpoint());
                Some(client)
            }
            Err(e) => {
                error!("Failed to initialize LLM client: {}", e);
                None
            }
        }
    }

    pub fn try_from_config(config: &FactCheckConfig) -> Result<Self, LlmError> {
        let api_key = config
            .llm_api_key()
            .map_err(|e| LlmError::MissingCredentials(e.to_string()))?;

        Self::new(
            api_key,
            config.llm_endpoint(),
            Duration::from_secs(config.llm_api.request_timeout_secs)
        )
    }
}

#[async_trait]
impl LlmClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        info!("Making LLM API request with model {}", request.model);
        debug!("API endpoint: {}", self.api_endpoint);
        debug!("Temperature: {}", request.temperature);
        debug!("Max tokens: {:?}", request.max_tokens);

        let response = self.http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling LLM API: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                LlmError::NetworkError(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(LlmError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get text from response: {}", e);
            LlmError::ParseError(e.to_string())
        })?;

        debug!("LLM response length: {} characters", response_text.len());
        extract_content(&response_text)
    }
}

/// Pull `choices[0].message.content` out of a chat-completions body
fn extract_content(response_text: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(response_text).map_err(|e| {
        warn!("Failed to parse API response: {}", e);
        LlmError::ParseError(format!("Failed to parse API response: {}", e))
    })?;

    let content = response.choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| {
            warn!("API returned empty choices array");
            LlmError::EmptyResponse
        })?;

    if content.is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    info!("API call completed successfully");
    Ok(content)
}
