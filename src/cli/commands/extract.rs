use anyhow::{ anyhow, Result };
use std::path::Path;
use std::sync::Arc;

use newscheck::implementations::claim_extractor::LLMClaimExtractor;
use newscheck::implementations::config::FactCheckConfig;
use newscheck::implementations::openai_client::OpenAiChatClient;
use newscheck::models::incident::total_facts;
use newscheck::traits::LlmClient;

use crate::cli::commands::load_article;
use crate::cli::{ ui, OutputFormat };

/// Extract incidents from an article and print them
pub async fn execute(
    config: &FactCheckConfig,
    article: Option<&Path>,
    format: OutputFormat
) -> Result<()> {
    let article_text = load_article(article)?;

    let llm = OpenAiChatClient::from_config(config).map(
        |client| Arc::new(client) as Arc<dyn LlmClient>
    );
    let extractor = LLMClaimExtractor::from_config(config, llm);

    let spinner = ui::spinner_with_message("Extracting claims...");
    let incidents = match extractor.try_extract(&article_text).await {
        Ok(incidents) => {
            spinner.finish_with_message("Claims extracted");
            incidents
        }
        Err(e) => {
            spinner.abandon_with_message("Extraction failed");
            return Err(anyhow!("Claim extraction failed: {}", e));
        }
    };

    if incidents.is_empty() {
        ui::print_warning("No incidents were found in the article");
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let document = serde_json::json!({ "incidents": incidents });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Text => {
            ui::display_incidents(&incidents);
            ui::print_success(
                &format!(
                    "Extracted {} incident(s) with {} fact(s)",
                    incidents.len(),
                    total_facts(&incidents)
                )
            );
        }
    }

    Ok(())
}
