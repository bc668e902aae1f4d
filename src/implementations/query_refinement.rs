use std::sync::Arc;
use std::time::Duration;

use log::{ debug, error, info, warn };

use crate::models::article::Article;
use crate::traits::llm_client::{ ChatMessage, ChatRequest, LlmClient };
use crate::traits::news_provider::NewsProvider;

/// Provider calls allowed per (query, provider): the original plus two refinements
pub const MAX_PROVIDER_CALLS: usize = 3;

const REFINEMENT_SYSTEM_PROMPT: &str =
    "You rewrite news search queries that returned no results. \
     Reduce the query to its 1 to 3 most essential keywords or named entities. \
     Respond with the rewritten query only, on a single line, without quotes or explanation.";

/// Retry policy for searches that come back empty.
///
/// The same policy object serves every provider: the provider is a parameter
/// of [`QueryRefinementPolicy::search`], so both adapters retry identically.
#[derive(Clone)]
pub struct QueryRefinementPolicy {
    llm: Option<Arc<dyn LlmClient>>,
    model: String,
    pacing: Duration,
}

impl QueryRefinementPolicy {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, model: impl Into<String>, pacing: Duration) -> Self {
        Self {
            llm,
            model: model.into(),
            pacing,
        }
    }

    /// Search `provider`, refining the query with the LLM while results are empty.
    ///
    /// Call sequence:
    /// 1. the original query;
    /// 2. a refined query, only if it is non-empty and differs from the original;
    /// 3. a second refinement that was asked to diverge from the first, only if
    ///    it differs from both the first refinement and the original.
    ///
    /// A provider error ends the sequence with an empty result; it is logged,
    /// never propagated.
    pub async fn search(
        &self,
        provider: &dyn NewsProvider,
        query: &str,
        language: &str,
        country: &str
    ) -> Vec<Article> {
        match self.call_provider(provider, query, language, country).await {
            Some(articles) if !articles.is_empty() => {
                return articles;
            }
            Some(_) => {}
            None => {
                return Vec::new();
            }
        }

        info!("{} returned no articles for '{}', refining query", provider.provider(), query);
        let first = match self.refine(query, None).await {
            Some(refined) if !same_query(&refined, query) => refined,
            Some(_) => {
                info!("Refined query is unchanged, not retrying {}", provider.provider());
                return Vec::new();
            }
            None => {
                return Vec::new();
            }
        };

        match self.call_provider(provider, &first, language, country).await {
            Some(articles) if !articles.is_empty() => {
                return articles;
            }
            Some(_) => {}
            None => {
                return Vec::new();
            }
        }

        info!("{} returned no articles for refinement '{}', refining again", provider.provider(), first);
        let second = match self.refine(query, Some(first.as_str())).await {
            Some(refined) if !same_query(&refined, &first) && !same_query(&refined, query) =>
                refined,
            Some(refined) => {
                info!("Second refinement '{}' repeats an earlier query, skipping retry", refined);
                return Vec::new();
            }
            None => {
                return Vec::new();
            }
        };

        self.call_provider(provider, &second, language, country).await.unwrap_or_default()
    }

    /// One paced provider call; `None` when the provider failed
    async fn call_provider(
        &self,
        provider: &dyn NewsProvider,
        query: &str,
        language: &str,
        country: &str
    ) -> Option<Vec<Article>> {
        if !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
        }
        match provider.search(query, language, country).await {
            Ok(articles) => Some(articles),
            Err(e) => {
                error!("{}", e);
                None
            }
        }
    }

    /// Ask the LLM for a simplified query; `None` when no usable rewrite came back
    async fn refine(&self, query: &str, previous: Option<&str>) -> Option<String> {
        let llm = match &self.llm {
            Some(llm) => llm,
            None => {
                warn!("LLM client is not initialized, cannot refine query");
                return None;
            }
        };

        let mut prompt = format!("Original query: {}\n", query);
        let temperature = match previous {
            None => 0.0,
            Some(previous) => {
                prompt.push_str(
                    &format!(
                        "A previous rewrite, \"{}\", also returned no results. \
                         Produce a different rewrite that does not repeat it: \
                         use other keywords, synonyms or a broader entity.\n",
                        previous
                    )
                );
                0.5
            }
        };
        prompt.push_str("Rewritten query:");

        let request = ChatRequest::new(
            self.model.clone(),
            vec![ChatMessage::system(REFINEMENT_SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature
        ).with_max_tokens(50);

        match llm.complete(&request).await {
            Ok(content) => {
                let refined = clean_refinement(&content);
                debug!("Refined '{}' -> '{}'", query, refined);
                if refined.is_empty() {
                    warn!("LLM returned an empty refinement for '{}'", query);
                    None
                } else {
                    Some(refined)
                }
            }
            Err(e) => {
                error!("Query refinement failed: {}", e);
                None
            }
        }
    }
}

/// First non-empty line, stripped of quotes and a leading label
fn clean_refinement(content: &str) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let line = match line.split_once(':') {
        Some((head, rest)) if head.to_lowercase().contains("query") => rest.trim(),
        _ => line,
    };
    line.trim_matches(|c: char| c == '"' || c == '\'' || c == '`').trim().to_string()
}

/// Queries compare equal ignoring case and surrounding whitespace
fn same_query(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
