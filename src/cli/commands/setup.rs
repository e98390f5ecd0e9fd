//! Setup command - interactive model selection.

use crate::cli::Output;
use crate::config::{available_models, ModelConfig, Provider, Settings, DEFAULT_MODEL_ID};
use crate::gateway::{validate_model, ModelGateway};
use anyhow::Result;
use console::style;
use std::io::{self, Write};
use std::path::Path;

/// Run interactive model selection and persist the choice.
///
/// Custom models are validated with `gateway` first; a model that does not
/// answer sends the user back to the picker.
pub async fn run_setup(
    settings: &mut Settings,
    config_path: &Path,
    gateway: &dyn ModelGateway,
) -> Result<ModelConfig> {
    Output::header("tldw Setup");
    println!();
    println!("Welcome to tldw! Let's set up your preferred LLM model.\n");

    let selected = loop {
        let choice = pick_model()?;
        match choice {
            Some(model) => {
                settings.set_selected_model(&model.id);
                break model;
            }
            None => {
                let (id, provider) = prompt_custom_model()?;
                match adopt_custom_model(settings, &id, provider, gateway).await {
                    Ok(model) => break model,
                    Err(e) => {
                        Output::error(&format!("Cannot use this model: {}", e));
                        Output::warning("Please choose a different model.");
                        println!();
                    }
                }
            }
        }
    };

    settings.save_to(config_path)?;
    println!();
    Output::success(&format!("Set model to {}", selected.id));
    println!();

    Ok(selected)
}

/// Validate a custom model and record it in `settings` if it answers.
pub(crate) async fn adopt_custom_model(
    settings: &mut Settings,
    id: &str,
    provider: Provider,
    gateway: &dyn ModelGateway,
) -> crate::Result<ModelConfig> {
    let model = ModelConfig::custom(id, provider);
    Output::info(&format!("Validating {} on {}...", id, provider));
    validate_model(&model, gateway).await?;
    Output::success(&format!("Model {} validated successfully!", id));

    settings.set_custom_model(id, provider);
    Ok(model)
}

/// Show the catalog and read a choice. `None` means a custom model.
fn pick_model() -> Result<Option<ModelConfig>> {
    let models = available_models();
    let default_choice = models
        .iter()
        .position(|m| m.id == DEFAULT_MODEL_ID)
        .map(|i| i + 1)
        .unwrap_or(1);

    println!("  {}", style("Direct providers:").bold().underlined());
    let mut printed_openrouter_header = false;
    for (i, model) in models.iter().enumerate() {
        if model.provider == Provider::OpenRouter && !printed_openrouter_header {
            println!();
            println!("  {}", style("OpenRouter models:").bold().underlined());
            printed_openrouter_header = true;
        }
        let default_tag = if model.id == DEFAULT_MODEL_ID {
            format!(" {}", style("(default)").yellow())
        } else {
            String::new()
        };
        println!(
            "  {} {}  {}{}",
            style(format!("{}.", i + 1)).bold(),
            model.id,
            style(format!("({})", model.name)).dim(),
            default_tag
        );
    }

    let custom_choice = models.len() + 1;
    println!(
        "\n  {} {}",
        style(format!("{}.", custom_choice)).bold(),
        style("Enter a custom model...").italic()
    );
    println!();

    let choice = loop {
        let input = prompt(&format!(
            "Pick a model [1-{}] ({})",
            custom_choice, default_choice
        ))?;
        match parse_choice(&input, custom_choice, default_choice) {
            Some(choice) => break choice,
            None => Output::warning(&format!(
                "Please enter a number between 1 and {}.",
                custom_choice
            )),
        }
    };

    if choice == custom_choice {
        Ok(None)
    } else {
        Ok(Some(models[choice - 1].clone()))
    }
}

fn prompt_custom_model() -> Result<(String, Provider)> {
    println!();
    println!("{}", style("Enter a custom model in provider/model format.").bold());
    println!(
        "{}",
        style("Examples: anthropic/claude-sonnet-4, openai/gpt-4o, google/gemini-2.0-flash").dim()
    );
    println!();

    let id = loop {
        let input = prompt("Model ID (provider/model)")?;
        if !input.is_empty() {
            break input;
        }
    };

    let provider = loop {
        let input = prompt("Provider [openrouter/anthropic/openai] (openrouter)")?;
        if input.is_empty() {
            break Provider::OpenRouter;
        }
        match input.parse::<Provider>() {
            Ok(p) => break p,
            Err(e) => Output::warning(&e),
        }
    };

    Ok((id, provider))
}

/// Parse a 1-based menu choice. Empty input picks the default.
fn parse_choice(input: &str, max: usize, default: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    input.parse::<usize>().ok().filter(|n| (1..=max).contains(n))
}

/// Print a question and read one trimmed line.
fn prompt(message: &str) -> io::Result<String> {
    print!("{} {}: ", style("?").cyan(), message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
