use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::errors::FactCheckError;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM client is not configured: {0}")] MissingCredentials(String),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("LLM returned no content")] EmptyResponse,
}

impl From<LlmError> for FactCheckError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredentials(msg) => FactCheckError::ConfigurationError(msg),
            other =>
                FactCheckError::ExternalServiceError {
                    service: "LLM API".to_string(),
                    message: other.to_string(),
                },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// Serialized as `{"type": "json_object"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// Chat-completion request in the OpenAI wire shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Concatenated message contents, handy for logging and test routing
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Opaque chat-completion capability shared by every LLM-backed stage
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one request and return the first choice's message content
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
