use serde::{ Deserialize, Deserializer, Serialize };

/// A single coherent news event extracted from an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub incident_summary: String,

    /// Several natural-language queries joined with " OR "
    #[serde(default)]
    pub search_statement: String,

    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// An individually verifiable claim belonging to one incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub statement: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Fact {
    pub fn has_statement(&self) -> bool {
        !self.statement.trim().is_empty()
    }
}

impl Incident {
    /// The individual queries that make up the search statement
    pub fn search_queries(&self) -> Vec<&str> {
        self.search_statement
            .split(" OR ")
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .collect()
    }

    pub fn has_search_statement(&self) -> bool {
        !self.search_statement.trim().is_empty()
    }
}

/// Total number of facts across all incidents
pub fn total_facts(incidents: &[Incident]) -> usize {
    incidents.iter().map(|i| i.facts.len()).sum()
}
