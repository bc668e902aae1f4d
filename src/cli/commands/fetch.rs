use anyhow::{ anyhow, Result };
use std::sync::Arc;

use newscheck::implementations::config::FactCheckConfig;
use newscheck::implementations::openai_client::OpenAiChatClient;
use newscheck::implementations::source_fetcher::NewsSourceFetcher;
use newscheck::traits::LlmClient;

use crate::cli::{ ui, OutputFormat };

/// Search every configured provider and print the results per provider
pub async fn execute(
    config: &FactCheckConfig,
    query: &str,
    language: Option<&str>,
    country: Option<&str>,
    format: OutputFormat
) -> Result<()> {
    if query.trim().is_empty() {
        return Err(anyhow!("Query is empty"));
    }

    let llm = OpenAiChatClient::from_config(config).map(
        |client| Arc::new(client) as Arc<dyn LlmClient>
    );
    let fetcher = NewsSourceFetcher::from_config(config, llm);

    let spinner = ui::spinner_with_message(&format!("Searching news for '{}'...", query));
    let grouped = fetcher.fetch_grouped(query, language, country).await;
    spinner.finish_with_message("Search finished");

    match format {
        OutputFormat::Json => {
            let document: serde_json::Map<String, serde_json::Value> = grouped
                .iter()
                .map(|(provider, articles)| {
                    let articles = serde_json::to_value(articles)?;
                    Ok((provider.display_name().to_string(), articles))
                })
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Text => {
            if grouped.is_empty() {
                ui::print_warning("No articles found from any provider");
            }
            for (provider, articles) in &grouped {
                ui::print_header(&format!("{} ({} article(s))", provider, articles.len()));
                ui::display_articles(articles);
            }
        }
    }

    Ok(())
}
