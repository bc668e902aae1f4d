use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Confirm, Input };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use newscheck::models::{ Article, Incident, PipelineStage, ResultBundle, VerdictLabel, Verification };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn text_width() -> usize {
    let columns = Term::stdout().size().1 as usize;
    columns.saturating_sub(10).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping after `indent`
fn print_indented(text: &str, indent: &str) {
    let width = text_width().saturating_sub(indent.len());
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        for wrapped_line in wrap(line, width) {
            println!("{}{}", indent, wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

fn colored_label(label: Option<VerdictLabel>) -> ColoredString {
    match label {
        Some(VerdictLabel::Proved) => "✓ Proved".green().bold(),
        Some(VerdictLabel::Refuted) => "✗ Refuted".red().bold(),
        Some(VerdictLabel::Unclear) => "? Unclear".yellow().bold(),
        None => "⚠ Unparsed".red(),
    }
}

/// Print incidents and their facts
pub fn display_incidents(incidents: &[Incident]) {
    print_header("Extracted Incidents");
    for (i, incident) in incidents.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).bold(), incident.incident_summary.bold());
        if incident.has_search_statement() {
            println!("   {} {}", "Search:".cyan(), incident.search_statement);
        } else {
            println!("   {}", "No search statement".yellow());
        }
        for fact in &incident.facts {
            print_indented(&format!("- {}", fact.statement), "   ");
            let mut context = Vec::new();
            if let Some(date) = &fact.date {
                context.push(format!("date: {}", date));
            }
            if let Some(place) = &fact.place {
                context.push(format!("place: {}", place));
            }
            if !context.is_empty() {
                println!("     {}", context.join(", ").dimmed());
            }
        }
        println!();
    }
}

/// Print fetched articles
pub fn display_articles(articles: &[Article]) {
    for article in articles {
        println!("{} {}", "•".cyan(), article.title.bold());
        println!("  {} ({})", article.source_name.italic(), article.provider);
        if !article.description.is_empty() {
            print_indented(&article.description, "  ");
        }
    }
}

/// Print each verification with its colored verdict
pub fn display_verifications(verifications: &[Verification]) {
    print_header("Verification Results");
    for (i, verification) in verifications.iter().enumerate() {
        println!("{} {}", format!("{}.", i + 1).bold(), verification.fact);
        println!("   {}", colored_label(verification.label()));

        match &verification.assessment {
            Some(verdict) => {
                print_indented(&verdict.reasoning, "   ");
                if !verdict.sources.is_empty() {
                    println!("   {} {}", "Sources:".cyan(), verdict.sources.join(", "));
                }
                if let Some(confidence) = verdict.confidence {
                    println!("   {} {}", "Confidence:".cyan(), confidence);
                }
            }
            None => print_indented(&verification.verdict, "   "),
        }
        println!();
    }
}

/// Print a whole bundle with a verdict tally
pub fn display_bundle(bundle: &ResultBundle) {
    display_incidents(&bundle.incidents);
    print_info(&format!("{} article(s) used as evidence", bundle.articles.len()));
    display_verifications(&bundle.verifications);

    print_header("Summary");
    print_result("Generated at", &bundle.generated_at.to_rfc3339());
    print_result("Facts", &bundle.fact_count().to_string());
    for (label, count) in bundle.verdict_summary() {
        print_result(&label, &count.to_string());
    }
}

/// Spinner text for a pipeline stage
pub fn stage_message(stage: PipelineStage) -> Option<String> {
    match stage {
        PipelineStage::ExtractingClaims |
        PipelineStage::FetchingSources |
        PipelineStage::Verifying => Some(format!("{}...", stage)),
        _ => None,
    }
}

/// Read an article from the terminal; an empty line ends input
pub fn get_article_text() -> std::io::Result<String> {
    let mut lines = Vec::new();

    println!("Paste the article text (empty line to finish):");
    loop {
        let line: String = Input::with_theme(&get_theme())
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        if line.trim().is_empty() {
            break;
        }

        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Confirm an action with the user
pub fn confirm_action(prompt: &str) -> std::io::Result<bool> {
    Confirm::with_theme(&get_theme())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
