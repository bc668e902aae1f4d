use clap::{ Parser, Subcommand, ValueEnum };
use std::path::PathBuf;

use newscheck::EvidenceScope;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "newscheck",
    about = "Extracts factual claims from news articles and verifies them against other news sources",
    version,
    author,
    long_about = None
)]
pub struct NewscheckCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Which articles are shown to the verifier for each fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Every article fetched during the run
    Pooled,
    /// Only the articles fetched for the fact's own incident
    PerIncident,
}

impl From<ScopeArg> for EvidenceScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Pooled => EvidenceScope::Pooled,
            ScopeArg::PerIncident => EvidenceScope::PerIncident,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: extract claims, fetch sources, verify facts
    Check {
        /// Path to the article text; prompts for it when omitted
        #[arg(short, long)]
        article: Option<PathBuf>,

        /// Directory for the per-stage JSON files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evidence given to the verifier for each fact
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// Two-letter country code for the news searches
        #[arg(long)]
        country: Option<String>,

        /// Language code for the news searches
        #[arg(long)]
        language: Option<String>,

        /// Do not write the per-stage JSON files
        #[arg(long, default_value = "false")]
        no_persist: bool,

        /// Also save the whole result bundle to this file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Interactive mode
        #[arg(short, long, default_value = "false")]
        interactive: bool,
    },

    /// Extract incidents and facts from an article without verifying them
    Extract {
        /// Path to the article text; prompts for it when omitted
        #[arg(short, long)]
        article: Option<PathBuf>,
    },

    /// Search the news providers for a query
    Fetch {
        /// Search query
        query: String,

        /// Language code
        #[arg(long)]
        language: Option<String>,

        /// Two-letter country code
        #[arg(long)]
        country: Option<String>,
    },

    /// Print a saved result bundle or claims file
    Show {
        /// Path to the JSON file
        path: PathBuf,

        /// Treat the file as a claims file (`{"incidents": [...]}`)
        #[arg(long, default_value = "false")]
        claims: bool,
    },
}
