use serde::{ Deserialize, Serialize };

use crate::models::common::Provider;

/// Source name used when a provider does not report one
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A news article returned by one of the search providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub source_name: String,
    pub provider: Provider,
}

impl Article {
    /// Title/description/source block used as verification context
    pub fn render_for_prompt(&self) -> String {
        let source = if self.source_name.trim().is_empty() {
            UNKNOWN_SOURCE
        } else {
            self.source_name.as_str()
        };
        format!("Title: {}\nDescription: {}\nSource: {}", self.title, self.description, source)
    }
}

/// Flatten articles into blank-line separated prompt blocks
pub fn render_corpus(articles: &[Article]) -> String {
    articles
        .iter()
        .map(Article::render_for_prompt)
        .collect::<Vec<_>>()
        .join("\n\n")
}
