use std::fs;
use std::path::Path;

use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::config::{ FetchOptions, PipelineOptions };
use crate::errors::FactCheckError;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const NEWSDATA_API_KEY_VAR: &str = "NEWSDATA_API_KEY";
pub const GNEWS_API_KEY_VAR: &str = "GNEWS_API_KEY";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_NEWSDATA_ENDPOINT: &str = "https://newsdata.io/api/1/news";
pub const DEFAULT_GNEWS_ENDPOINT: &str = "https://gnews.io/api/v4/search";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

impl From<ConfigError> for FactCheckError {
    fn from(err: ConfigError) -> Self {
        FactCheckError::ConfigurationError(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LlmApiConfig {
    /// API key for the LLM service; falls back to OPENAI_API_KEY
    pub api_key: Option<String>,

    /// Chat-completions endpoint
    pub api_endpoint: Option<String>,

    /// Model used by every LLM-backed stage
    pub model: Option<String>,

    /// Output budget for claim extraction
    pub extraction_max_tokens: usize,

    /// Sampling temperature for fact verification
    pub verification_temperature: f32,

    pub request_timeout_secs: u64,
}

impl Default for LlmApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: Some(DEFAULT_LLM_ENDPOINT.to_string()),
            model: Some(DEFAULT_MODEL.to_string()),
            extraction_max_tokens: 2500,
            verification_temperature: 0.2,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ProviderApiConfig {
    pub api_key: Option<String>,
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NewsApisConfig {
    /// NewsData.io; falls back to NEWSDATA_API_KEY
    pub newsdata: ProviderApiConfig,

    /// GNews.io; falls back to GNEWS_API_KEY
    pub gnews: ProviderApiConfig,
}

/// Process-wide configuration, built once at startup and passed by reference
/// into every component constructor
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FactCheckConfig {
    pub llm_api: LlmApiConfig,
    pub news_apis: NewsApisConfig,
    pub fetch: FetchOptions,
    pub pipeline: PipelineOptions,
}

impl FactCheckConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: FactCheckConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` when given (defaults otherwise), then fill any API key
    /// the file does not set from the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                debug!("No config file given, using defaults");
                Self::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Fill missing API keys using `lookup` (environment variable name -> value)
    pub fn apply_env_from<F>(&mut self, lookup: F) where F: Fn(&str) -> Option<String> {
        let slots = [
            (&mut self.llm_api.api_key, OPENAI_API_KEY_VAR),
            (&mut self.news_apis.newsdata.api_key, NEWSDATA_API_KEY_VAR),
            (&mut self.news_apis.gnews.api_key, GNEWS_API_KEY_VAR),
        ];
        for (slot, var) in slots {
            if non_empty(slot.as_deref()).is_some() {
                debug!("Using {} from config", var);
                continue;
            }
            match lookup(var).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    debug!("Using {} from environment", var);
                    *slot = Some(value);
                }
                None => warn!("{} is not configured", var),
            }
        }
    }

    /// The LLM API key, or `MissingApiKey` when none was configured
    pub fn llm_api_key(&self) -> Result<&str, ConfigError> {
        non_empty(self.llm_api.api_key.as_deref()).ok_or_else(||
            ConfigError::MissingApiKey(OPENAI_API_KEY_VAR.to_string())
        )
    }

    pub fn llm_model(&self) -> &str {
        self.llm_api.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn llm_endpoint(&self) -> &str {
        self.llm_api.api_endpoint.as_deref().unwrap_or(DEFAULT_LLM_ENDPOINT)
    }

    pub fn newsdata_api_key(&self) -> Option<&str> {
        non_empty(self.news_apis.newsdata.api_key.as_deref())
    }

    pub fn newsdata_endpoint(&self) -> &str {
        self.news_apis.newsdata.api_endpoint.as_deref().unwrap_or(DEFAULT_NEWSDATA_ENDPOINT)
    }

    pub fn gnews_api_key(&self) -> Option<&str> {
        non_empty(self.news_apis.gnews.api_key.as_deref())
    }

    pub fn gnews_endpoint(&self) -> &str {
        self.news_apis.gnews.api_endpoint.as_deref().unwrap_or(DEFAULT_GNEWS_ENDPOINT)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvidenceScope;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let yaml =
            r#"
llm_api:
  model: gpt-4o
fetch:
  pacing_ms: 0
pipeline:
  evidence_scope: per_incident
  persist_artifacts: false
"#;
        let config: FactCheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.llm_model(), "gpt-4o");
        assert_eq!(config.llm_api.extraction_max_tokens, 2500);
        assert_eq!(config.fetch.pacing_ms, 0);
        assert_eq!(config.fetch.max_results, 10);
        assert_eq!(config.fetch.default_country, "in");
        assert_eq!(config.pipeline.evidence_scope, EvidenceScope::PerIncident);
        assert!(!config.pipeline.persist_artifacts);
        assert_eq!(config.gnews_endpoint(), DEFAULT_GNEWS_ENDPOINT);
    }

    #[test]
    fn env_fills_only_missing_keys() {
        let mut config = FactCheckConfig::default();
        config.news_apis.gnews.api_key = Some("from-file".to_string());
        config.apply_env_from(|name| {
            match name {
                OPENAI_API_KEY_VAR => Some("sk-env".to_string()),
                GNEWS_API_KEY_VAR => Some("from-env".to_string()),
                _ => None,
            }
        });
        assert_eq!(config.llm_api_key().unwrap(), "sk-env");
        assert_eq!(config.gnews_api_key(), Some("from-file"));
        assert_eq!(config.newsdata_api_key(), None);
    }

    #[test]
    fn blank_llm_key_is_missing() {
        let mut config = FactCheckConfig::default();
        config.llm_api.api_key = Some("  ".to_string());
        assert!(matches!(config.llm_api_key(), Err(ConfigError::MissingApiKey(_))));
    }
}
