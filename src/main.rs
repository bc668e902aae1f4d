use anyhow::Result;
use clap::Parser;
use log::{ debug, info, warn };

use newscheck::implementations::config::FactCheckConfig;

mod cli;
use cli::commands::check::CheckArgs;
use cli::{ Commands, NewscheckCli };

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the command line arguments
    let cli = NewscheckCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let config = FactCheckConfig::load(cli.config.as_deref())?;
    if config.llm_api_key().is_err() {
        warn!("No OpenAI API key configured; LLM-backed stages will fail");
    }

    let result = match &cli.command {
        Commands::Check {
            article,
            output,
            scope,
            country,
            language,
            no_persist,
            save,
            interactive,
        } => {
            let args = CheckArgs {
                article: article.as_deref(),
                output: output.as_deref(),
                scope: scope.map(Into::into),
                country: country.as_deref(),
                language: language.as_deref(),
                no_persist: *no_persist,
                save: save.as_deref(),
                interactive: *interactive,
            };
            cli::commands::check::execute(config, args, cli.output_format).await
        }

        Commands::Extract { article } => {
            cli::commands::extract::execute(&config, article.as_deref(), cli.output_format).await
        }

        Commands::Fetch { query, language, country } => {
            cli::commands::fetch::execute(
                &config,
                query,
                language.as_deref(),
                country.as_deref(),
                cli.output_format
            ).await
        }

        Commands::Show { path, claims } => {
            cli::commands::show::execute(path, *claims, cli.output_format)
        }
    };

    if let Err(e) = &result {
        cli::ui::print_error(&e.to_string());
    }
    result
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
