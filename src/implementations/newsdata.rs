use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, error, info };
use serde::Deserialize;

use crate::implementations::config::FactCheckConfig;
use crate::models::article::{ Article, UNKNOWN_SOURCE };
use crate::models::common::Provider;
use crate::traits::news_provider::{ NewsProvider, ProviderError };

const PROVIDER: Provider = Provider::NewsData;

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    status: String,
    /// An array on success, an error object otherwise
    #[serde(default)]
    results: serde_json::Value,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct NewsDataArticle {
    article_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    source_name: Option<String>,
}

/// NewsData.io adapter (provider A)
pub struct NewsDataProvider {
    http_client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    max_results: usize,
}

impl NewsDataProvider {
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        max_results: usize,
        timeout: Duration
    ) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: PROVIDER,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: endpoint.into(),
            max_results,
        })
    }

    pub fn from_config(config: &FactCheckConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.newsdata_api_key().map(str::to_string),
            config.newsdata_endpoint(),
            config.fetch.max_results,
            config.fetch.request_timeout()
        )
    }
}

#[async_trait]
impl NewsProvider for NewsDataProvider {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(
        &self,
        query: &str,
        language: &str,
        country: &str
    ) -> Result<Vec<Article>, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey(PROVIDER))?;

        info!("Querying NewsData.io with q='{}', lang='{}', country='{}'", query, language, country);

        let response = self.http_client
            .get(&self.endpoint)
            .query(
                &[
                    ("apikey", api_key),
                    ("q", query),
                    ("language", language),
                    ("country", country),
                ]
            )
            .send().await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(PROVIDER)
                } else {
                    ProviderError::NetworkError { provider: PROVIDER, message: e.to_string() }
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ProviderError::NetworkError {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        // NewsData reports API errors in a JSON body, often with a 4xx status
        match parse_response(&body, self.max_results) {
            Ok(articles) => {
                info!("Fetched {} articles from NewsData.io", articles.len());
                Ok(articles)
            }
            Err(ProviderError::DecodeError { .. }) if !status.is_success() => {
                Err(ProviderError::HttpError {
                    provider: PROVIDER,
                    status: status.as_u16(),
                    message: body.chars().take(500).collect(),
                })
            }
            Err(e) => {
                error!("{}", e);
                debug!("Full response: {}", body);
                Err(e)
            }
        }
    }
}

/// Normalize a NewsData.io response body into at most `max_results` articles
fn parse_response(body: &str, max_results: usize) -> Result<Vec<Article>, ProviderError> {
    let data: NewsDataResponse = serde_json::from_str(body).map_err(|e| ProviderError::DecodeError {
        provider: PROVIDER,
        message: e.to_string(),
    })?;

    if data.status != "success" {
        let message = data.message
            .or_else(|| data.results.get("message").cloned())
            .map(|m| match m {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(ProviderError::ApiError { provider: PROVIDER, message });
    }

    let results: Vec<NewsDataArticle> = match data.results {
        serde_json::Value::Null => Vec::new(),
        value =>
            serde_json::from_value(value).map_err(|e| ProviderError::DecodeError {
                provider: PROVIDER,
                message: e.to_string(),
            })?,
    };

    Ok(
        results
            .into_iter()
            .take(max_results)
            .map(|a| Article {
                article_id: a.article_id,
                title: a.title.unwrap_or_default(),
                description: a.description.unwrap_or_default(),
                content: None,
                source_name: a.source_name.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                provider: PROVIDER,
            })
            .collect()
    )
}
