use std::time::Duration;

use async_trait::async_trait;
use log::info;
use serde::Deserialize;

use crate::implementations::config::FactCheckConfig;
use crate::models::article::Article;
use crate::models::common::Provider;
use crate::traits::news_provider::{ NewsProvider, ProviderError };

const PROVIDER: Provider = Provider::GNews;
const UNKNOWN_GNEWS_SOURCE: &str = "Unknown Source";

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    articles: Option<Vec<GNewsArticle>>,
}

#[derive(Debug, Deserialize)]
struct GNewsArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    #[serde(default)]
    source: Option<GNewsSource>,
}

#[derive(Debug, Deserialize)]
struct GNewsSource {
    name: Option<String>,
}

/// GNews.io adapter (provider B)
pub struct GNewsProvider {
    http_client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    max_results: usize,
}

impl GNewsProvider {
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
            config.gnews_api_key().map(str::to_string),
            config.gnews_endpoint(),
            config.fetch.max_results,
            config.fetch.request_timeout()
        )
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
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
        let max = self.max_results.to_string();

        // token stays out of the log line
        info!(
            "Querying GNews.io with params: q='{}', lang='{}', country='{}', max={}, sortby=relevance",
            query,
            language,
            country,
            max
        );

        let response = self.http_client
            .get(&self.endpoint)
            .query(
                &[
                    ("q", query),
                    ("lang", language),
                    ("country", country),
                    ("max", max.as_str()),
                    ("token", api_key),
                    ("sortby", "relevance"),
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

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpError {
                provider: PROVIDER,
                status,
                message: text.chars().take(500).collect(),
            });
        }

        let body = response.text().await.map_err(|e| ProviderError::NetworkError {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        let articles = parse_response(&body, self.max_results)?;
        info!("Fetched {} articles from GNews.io", articles.len());
        Ok(articles)
    }
}

/// Normalize a GNews.io response body into at most `max_results` articles
fn parse_response(body: &str, max_results: usize) -> Result<Vec<Article>, ProviderError> {
    let data: GNewsResponse = serde_json::from_str(body).map_err(|e| ProviderError::DecodeError {
        provider: PROVIDER,
        message: format!("{}: {}", e, body.chars().take(200).collect::<String>()),
    })?;

    let articles = data.articles.ok_or_else(|| ProviderError::DecodeError {
        provider: PROVIDER,
        message: format!(
            "response missing 'articles': {}",
            body.chars().take(200).collect::<String>()
        ),
    })?;

    Ok(
        articles
            .into_iter()
            .take(max_results)
            .map(|a| Article {
                article_id: None,
                title: a.title.unwrap_or_default(),
                description: a.description.unwrap_or_default(),
                content: a.content,
                source_name: a.source
                    .and_then(|s| s.name)
                    .unwrap_or_else(|| UNKNOWN_GNEWS_SOURCE.to_string()),
                provider: PROVIDER,
            })
            .collect()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles_keep_content_and_source_name() {
        let body =
            r#"{"totalArticles": 2, "articles": [
            {"title": "A", "description": "d", "content": "full text", "source": {"name": "Reuters", "url": "x"}},
            {"title": "B", "description": "e", "content": null}
        ]}"#;
        let articles = parse_response(body, 10).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_name, "Reuters");
        assert_eq!(articles[0].content.as_deref(), Some("full text"));
        assert_eq!(articles[1].source_name, "Unknown Source");
        assert_eq!(articles[1].provider, Provider::GNews);
    }

    #[test]
    fn missing_articles_key_is_a_decode_error() {
        let result = parse_response(r#"{"errors": ["bad token"]}"#, 10);
        assert!(matches!(result, Err(ProviderError::DecodeError { .. })));
    }
}
