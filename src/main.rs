//! tldw CLI entry point.

use anyhow::Result;
use clap::Parser;
use tldw::cli::{commands, Cli, Commands};
use tldw::config::{Credentials, Settings};
use tldw::gateway::ProviderGateway;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli
        .config
        .as_deref()
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);
    let mut settings = Settings::load_from(Some(&config_path))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tldw={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let gateway = ProviderGateway::new(Credentials::from_env(), &settings.llm);

    // Execute command
    match &cli.command {
        Commands::Summarize {
            url,
            gimme,
            model,
            json,
            transcript,
            force,
        } => {
            let options = commands::SummarizeOptions {
                gimme: gimme.as_deref(),
                model: model.as_deref(),
                json: *json,
                transcript: transcript.as_deref(),
                force: *force,
            };
            commands::run_summarize(url, options, settings, &config_path).await?;
        }

        Commands::Setup => {
            commands::run_setup(&mut settings, &config_path, &gateway).await?;
        }

        Commands::Models { action } => {
            commands::run_models(action, settings, &config_path, &gateway).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings, &config_path)?;
        }
    }

    Ok(())
}
