use anyhow::{ anyhow, Result };
use indicatif::ProgressBar;
use std::path::{ Path, PathBuf };

use newscheck::config::EvidenceScope;
use newscheck::implementations::artifacts::ArtifactStore;
use newscheck::implementations::config::FactCheckConfig;
use newscheck::implementations::pipeline::FactCheckPipeline;
use newscheck::models::PipelineStage;

use crate::cli::commands::load_article;
use crate::cli::{ ui, OutputFormat };

/// Overrides for the pipeline section of the configuration
pub struct CheckArgs<'a> {
    pub article: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub scope: Option<EvidenceScope>,
    pub country: Option<&'a str>,
    pub language: Option<&'a str>,
    pub no_persist: bool,
    pub save: Option<&'a Path>,
    pub interactive: bool,
}

/// Run the full pipeline on one article
pub async fn execute(
    mut config: FactCheckConfig,
    args: CheckArgs<'_>,
    format: OutputFormat
) -> Result<()> {
    apply_overrides(&mut config, &args);

    let article_text = load_article(args.article)?;
    ui::print_info(&format!("Article length: {} characters", article_text.chars().count()));

    if args.interactive && !ui::confirm_action("Run the fact-check pipeline on this article?")? {
        ui::print_info("Cancelled.");
        return Ok(());
    }

    let pipeline = FactCheckPipeline::from_config(&config);

    ui::print_header("Fact-Checking Pipeline");
    let mut spinner: Option<ProgressBar> = None;
    let mut on_stage = |stage: PipelineStage| {
        if let Some(previous) = spinner.take() {
            if stage == PipelineStage::Error {
                previous.abandon_with_message("Stage failed");
            } else {
                previous.finish_with_message("Done");
            }
        }
        if let Some(message) = ui::stage_message(stage) {
            spinner = Some(ui::spinner_with_message(&message));
        }
    };
    let outcome = pipeline.run_with_progress(&article_text, &mut on_stage).await;

    let bundle = match outcome.bundle {
        Some(bundle) => bundle,
        None => {
            let stage = outcome.failed_stage.unwrap_or(PipelineStage::Error);
            let reason = outcome.error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(anyhow!("Pipeline failed during {}: {}", stage, reason));
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Text => ui::display_bundle(&bundle),
    }

    if config.pipeline.persist_artifacts {
        ui::print_info(
            &format!("Stage files written to {}", config.pipeline.output_dir.display())
        );
    }

    if let Some(path) = args.save {
        let (dir, filename) = split_path(path)?;
        let saved = ArtifactStore::new(dir).save_bundle(&bundle, &filename)?;
        ui::print_success(&format!("Saved result bundle to {}", saved.display()));
    }

    let failed = bundle.verifications
        .iter()
        .filter(|v| v.is_error())
        .count();
    if failed > 0 {
        ui::print_warning(&format!("{} fact(s) could not be verified", failed));
    }

    Ok(())
}

fn apply_overrides(config: &mut FactCheckConfig, args: &CheckArgs<'_>) {
    let pipeline = &mut config.pipeline;
    if let Some(output) = args.output {
        pipeline.output_dir = output.to_path_buf();
    }
    if let Some(scope) = args.scope {
        pipeline.evidence_scope = scope;
    }
    if let Some(country) = args.country {
        pipeline.country = Some(country.to_string());
    }
    if let Some(language) = args.language {
        pipeline.language = Some(language.to_string());
    }
    if args.no_persist {
        pipeline.persist_artifacts = false;
    }
}

fn split_path(path: &Path) -> Result<(PathBuf, String)> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid output file: {}", path.display()))?
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, filename))
}
