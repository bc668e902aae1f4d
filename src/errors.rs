use thiserror::Error;

/// Custom error types for the fact-checking pipeline
#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Claim extraction error: {0}")]
    ExtractionError(String),

    #[error("Source fetching error: {0}")]
    FetchError(String),

    #[error("Verification error: {0}")]
    VerificationError(String),

    #[error("Error in external service {service}: {message}")]
    ExternalServiceError { service: String, message: String },

    #[error("Artifact error: {0}")]
    ArtifactError(String),

    #[error("System error: {0}")]
    SystemError(String),
}

/// Result type specific to fact-checking operations
pub type FactCheckResult<T> = Result<T, FactCheckError>;

