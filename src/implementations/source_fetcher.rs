use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{ error, info, warn };

use crate::config::FetchOptions;
use crate::errors::FactCheckResult;
use crate::implementations::config::FactCheckConfig;
use crate::implementations::gnews::GNewsProvider;
use crate::implementations::newsdata::NewsDataProvider;
use crate::implementations::query_refinement::QueryRefinementPolicy;
use crate::models::article::Article;
use crate::models::common::Provider;
use crate::traits::llm_client::LlmClient;
use crate::traits::news_provider::NewsProvider;
use crate::traits::source_fetcher::SourceFetcher;

/// Fetches evidence from every configured provider, one provider at a time
pub struct NewsSourceFetcher {
    providers: Vec<Arc<dyn NewsProvider>>,
    refinement: QueryRefinementPolicy,
    options: FetchOptions,
}

impl NewsSourceFetcher {
    pub fn new(
        providers: Vec<Arc<dyn NewsProvider>>,
        refinement: QueryRefinementPolicy,
        options: FetchOptions
    ) -> Self {
        Self {
            providers,
            refinement,
            options,
        }
    }

    /// NewsData.io then GNews.io, sharing the LLM client for refinement.
    ///
    /// An adapter whose HTTP client cannot be built is left out and logged.
    pub fn from_config(config: &FactCheckConfig, llm: Option<Arc<dyn LlmClient>>) -> Self {
        let mut providers: Vec<Arc<dyn NewsProvider>> = Vec::new();
        match NewsDataProvider::from_config(config) {
            Ok(provider) => providers.push(Arc::new(provider)),
            Err(e) => error!("Failed to initialize NewsData.io adapter: {}", e),
        }
        match GNewsProvider::from_config(config) {
            Ok(provider) => providers.push(Arc::new(provider)),
            Err(e) => error!("Failed to initialize GNews.io adapter: {}", e),
        }

        let refinement = QueryRefinementPolicy::new(
            llm,
            config.llm_model(),
            config.fetch.pacing()
        );
        Self::new(providers, refinement, config.fetch.clone())
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Search a single provider with the refinement retry policy.
    ///
    /// Unconfigured providers are skipped without any call.
    pub async fn fetch_from(
        &self,
        provider: &dyn NewsProvider,
        query: &str,
        language: Option<&str>,
        country: Option<&str>
    ) -> Vec<Article> {
        if !provider.is_configured() {
            warn!("{} API key is not configured, skipping provider", provider.provider());
            return Vec::new();
        }
        let language = self.options.resolve_language(language);
        let country = self.options.resolve_country(country);
        self.refinement.search(provider, query, &language, &country).await
    }

    /// Results keyed by provider; providers that returned nothing are omitted
    pub async fn fetch_grouped(
        &self,
        query: &str,
        language: Option<&str>,
        country: Option<&str>
    ) -> BTreeMap<Provider, Vec<Article>> {
        let mut grouped = BTreeMap::new();
        if query.trim().is_empty() {
            warn!("Empty or whitespace-only query for fetching sources. Returning empty results.");
            return grouped;
        }

        for provider in &self.providers {
            let articles = self.fetch_from(provider.as_ref(), query, language, country).await;
            if !articles.is_empty() {
                grouped.insert(provider.provider(), articles);
            }
        }

        let total: usize = grouped.values().map(Vec::len).sum();
        info!(
            "Total articles fetched for query '{}': {} from {} source(s).",
            query,
            total,
            grouped.len()
        );
        grouped
    }
}

#[async_trait]
impl SourceFetcher for NewsSourceFetcher {
    async fn fetch_all(
        &self,
        query: &str,
        language: Option<&str>,
        country: Option<&str>
    ) -> FactCheckResult<Vec<Article>> {
        let mut articles = Vec::new();
        for provider in &self.providers {
            articles.extend(self.fetch_from(provider.as_ref(), query, language, country).await);
        }
        info!("Fetched {} article(s) in total for '{}'", articles.len(), query);
        Ok(articles)
    }
}
