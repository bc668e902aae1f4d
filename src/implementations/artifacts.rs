use std::fs;
use std::path::{ Path, PathBuf };

use log::{ error, info };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::errors::FactCheckError;
use crate::models::article::Article;
use crate::models::bundle::ResultBundle;
use crate::models::incident::Incident;
use crate::models::verification::Verification;

pub const CLAIMS_FILE: &str = "claims_from_articles.json";
pub const ARTICLES_FILE: &str = "filtered_articles.json";
pub const VERIFICATIONS_FILE: &str = "fact_verification_results.json";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error on {path}: {source}")] Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")] Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No incidents found in {0}")] MissingIncidents(PathBuf),
}

impl From<ArtifactError> for FactCheckError {
    fn from(err: ArtifactError) -> Self {
        FactCheckError::ArtifactError(err.to_string())
    }
}

#[derive(Serialize)]
struct ClaimsDocumentRef<'a> {
    incidents: &'a [Incident],
}

#[derive(Deserialize)]
struct ClaimsDocument {
    incidents: Option<Vec<Incident>>,
}

/// Writes the per-stage audit files into one directory.
///
/// Files are UTF-8 JSON with 2-space indentation; non-ASCII text is kept as is.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }

    /// `{"incidents": [...]}` in `claims_from_articles.json`
    pub fn save_claims(&self, incidents: &[Incident]) -> Result<PathBuf, ArtifactError> {
        self.write_json(CLAIMS_FILE, &(ClaimsDocumentRef { incidents }))
    }

    pub fn save_articles(&self, articles: &[Article]) -> Result<PathBuf, ArtifactError> {
        self.write_json(ARTICLES_FILE, &articles)
    }

    pub fn save_verifications(
        &self,
        verifications: &[Verification]
    ) -> Result<PathBuf, ArtifactError> {
        self.write_json(VERIFICATIONS_FILE, &verifications)
    }

    pub fn save_bundle(
        &self,
        bundle: &ResultBundle,
        filename: &str
    ) -> Result<PathBuf, ArtifactError> {
        self.write_json(filename, bundle)
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        filename: &str,
        value: &T
    ) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| ArtifactError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.path_for(filename);
        let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Saved JSON data to: {}", path.display());
        Ok(path)
    }
}

/// Read a claims artifact back for auditing
pub fn load_claims(path: &Path) -> Result<Vec<Incident>, ArtifactError> {
    let contents = read(path)?;
    let document: ClaimsDocument = serde_json::from_str(&contents).map_err(|source| {
        error!("Error loading claims from {}: {}", path.display(), source);
        ArtifactError::Json { path: path.to_path_buf(), source }
    })?;

    let incidents = document.incidents.ok_or_else(|| {
        error!("No incidents found in the claims data.");
        ArtifactError::MissingIncidents(path.to_path_buf())
    })?;

    let queries = incidents
        .iter()
        .filter(|i| i.has_search_statement())
        .count();
    info!("Extracted {} queries from the claims data.", queries);
    Ok(incidents)
}

pub fn load_bundle(path: &Path) -> Result<ResultBundle, ArtifactError> {
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Provider;
    use crate::models::incident::Fact;

    fn sample_bundle() -> ResultBundle {
        let incidents = vec![Incident {
            incident_summary: "Flooding in Kochi".to_string(),
            search_statement: "Kochi floods OR Kerala flooding".to_string(),
            facts: vec![
                Fact {
                    statement: "Heavy rain flooded Kochi — roads closed".to_string(),
                    date: Some("12 June".to_string()),
                    place: Some("Kochi".to_string()),
                },
                Fact { statement: "Schools shut for two days".to_string(), date: None, place: None }
            ],
        }];
        let articles = vec![Article {
            article_id: Some("abc".to_string()),
            title: "Kochi under water".to_string(),
            description: "Roads closed after rain".to_string(),
            content: None,
            source_name: "Mathrubhumi".to_string(),
            provider: Provider::NewsData,
        }];
        let verifications = incidents[0].facts
            .iter()
            .map(|f| {
                Verification::new(
                    f.statement.clone(),
                    incidents[0].search_statement.clone(),
                    "Reasoning: reported.\nVerdict: Proved\nSources: Mathrubhumi\nConfidence Score: 80".to_string()
                )
            })
            .collect();
        ResultBundle::new(incidents, articles, verifications)
    }

    #[test]
    fn bundle_round_trip_keeps_counts() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let bundle = sample_bundle();

        let path = store.save_bundle(&bundle, "bundle.json").unwrap();
        let reloaded = load_bundle(&path).unwrap();

        assert_eq!(reloaded.incidents.len(), bundle.incidents.len());
        assert_eq!(reloaded.articles.len(), bundle.articles.len());
        assert_eq!(reloaded.verifications.len(), bundle.verifications.len());
        assert_eq!(reloaded, bundle);
    }

    #[test]
    fn stage_files_use_two_space_indent_and_keep_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("out"));
        let bundle = sample_bundle();

        let claims_path = store.save_claims(&bundle.incidents).unwrap();
        store.save_articles(&bundle.articles).unwrap();
        store.save_verifications(&bundle.verifications).unwrap();

        let claims = fs::read_to_string(&claims_path).unwrap();
        assert!(claims.starts_with("{\n  \"incidents\": ["));
        assert!(claims.contains("Kochi — roads closed"));
        assert!(dir.path().join("out").join(ARTICLES_FILE).exists());
        assert!(dir.path().join("out").join(VERIFICATIONS_FILE).exists());

        let incidents = load_claims(&claims_path).unwrap();
        assert_eq!(incidents, bundle.incidents);
    }

    #[test]
    fn claims_without_incidents_key_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        fs::write(&path, r#"{"claims": []}"#).unwrap();
        assert!(matches!(load_claims(&path), Err(ArtifactError::MissingIncidents(_))));
    }
}
