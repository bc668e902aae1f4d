use std::collections::BTreeMap;

use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::models::article::Article;
use crate::models::incident::{ total_facts, Incident };
use crate::models::verification::Verification;

/// Everything a successful pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub incidents: Vec<Incident>,
    pub articles: Vec<Article>,
    pub verifications: Vec<Verification>,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl ResultBundle {
    pub fn new(
        incidents: Vec<Incident>,
        articles: Vec<Article>,
        verifications: Vec<Verification>
    ) -> Self {
        Self {
            incidents,
            articles,
            verifications,
            generated_at: Utc::now(),
        }
    }

    pub fn fact_count(&self) -> usize {
        total_facts(&self.incidents)
    }

    /// Count of verifications per verdict label; unparsed verdicts are
    /// counted under "Unparsed".
    pub fn verdict_summary(&self) -> BTreeMap<String, usize> {
        let mut summary = BTreeMap::new();
        for verification in &self.verifications {
            let key = match verification.label() {
                Some(label) => label.to_string(),
                None => "Unparsed".to_string(),
            };
            *summary.entry(key).or_insert(0) += 1;
        }
        summary
    }
}
