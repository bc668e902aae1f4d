use std::path::PathBuf;
use std::time::Duration;

use serde::{ Deserialize, Serialize };

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY_FALLBACK: &str = "in";
pub const MAX_RESULTS_PER_QUERY: usize = 10;

/// Which fetched articles a fact is verified against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceScope {
    /// Every fact sees every article fetched for every incident
    #[default]
    Pooled,
    /// A fact sees only the articles fetched for its own incident
    PerIncident,
}

/// Options for the source fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub language: String,
    /// Used when no country code is supplied or it is blank
    pub default_country: String,
    pub max_results: usize,
    /// Fixed delay before every provider call
    pub pacing_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            default_country: DEFAULT_COUNTRY_FALLBACK.to_string(),
            max_results: MAX_RESULTS_PER_QUERY,
            pacing_ms: 1000,
            request_timeout_secs: 10,
        }
    }
}

impl FetchOptions {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolve_language(&self, language: Option<&str>) -> String {
        match language.map(str::trim) {
            Some(code) if !code.is_empty() => code.to_lowercase(),
            _ => self.language.clone(),
        }
    }

    /// Lower-cased country code, or the default region when none is given
    pub fn resolve_country(&self, country: Option<&str>) -> String {
        match country.map(str::trim) {
            Some(code) if !code.is_empty() => code.to_lowercase(),
            _ => self.default_country.to_lowercase(),
        }
    }
}

/// Options for the pipeline orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub evidence_scope: EvidenceScope,
    /// Pause between stages
    pub stage_pause_ms: u64,
    pub persist_artifacts: bool,
    pub output_dir: PathBuf,
    /// Language and country passed to the fetcher; `None` uses its defaults
    pub language: Option<String>,
    pub country: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            evidence_scope: EvidenceScope::Pooled,
            stage_pause_ms: 200,
            persist_artifacts: true,
            output_dir: PathBuf::from("."),
            language: None,
            country: None,
        }
    }
}

impl PipelineOptions {
    pub fn stage_pause(&self) -> Duration {
        Duration::from_millis(self.stage_pause_ms)
    }
}
