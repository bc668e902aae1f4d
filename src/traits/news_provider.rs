use async_trait::async_trait;
use thiserror::Error;

use crate::errors::FactCheckError;
use crate::models::article::Article;
use crate::models::common::Provider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key for {0} is not configured")] MissingApiKey(Provider),

    #[error("Timeout querying {0}")] Timeout(Provider),

    #[error("Network error from {provider}: {message}")] NetworkError {
        provider: Provider,
        message: String,
    },

    #[error("HTTP error from {provider}: {status} - {message}")] HttpError {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("Invalid JSON response from {provider}: {message}")] DecodeError {
        provider: Provider,
        message: String,
    },

    #[error("{provider} API error: {message}")] ApiError {
        provider: Provider,
        message: String,
    },
}

impl From<ProviderError> for FactCheckError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey(provider) =>
                FactCheckError::ConfigurationError(format!("missing API key for {}", provider)),
            other =>
                FactCheckError::ExternalServiceError {
                    service: "News provider".to_string(),
                    message: other.to_string(),
                },
        }
    }
}

/// One external news-search API
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Which provider this adapter talks to
    fn provider(&self) -> Provider;

    /// False when the provider has no API key and must be skipped
    fn is_configured(&self) -> bool;

    /// Run one search; results are normalized and capped by the adapter
    async fn search(
        &self,
        query: &str,
        language: &str,
        country: &str
    ) -> Result<Vec<Article>, ProviderError>;
}
