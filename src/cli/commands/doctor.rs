//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight::YT_DLP;
use crate::cli::Output;
use crate::config::{Credentials, Provider, Settings};
use crate::gateway::CLAUDE_CLI;
use console::style;
use std::path::Path;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("tldw Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let credentials = Credentials::from_env();
    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_checks = vec![
        check_ytdlp(),
        check_tool(
            CLAUDE_CLI,
            "Optional: used for Anthropic models when ANTHROPIC_API_KEY is not set",
            CheckStatus::Warning,
        ),
    ];
    for check in &tool_checks {
        check.print();
    }
    checks.extend(tool_checks);

    println!();

    println!("{}", style("API Keys").bold());
    for provider in [Provider::Anthropic, Provider::OpenAI, Provider::OpenRouter] {
        let check = check_api_key(&credentials, provider);
        check.print();
        checks.push(check);
    }

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    let model_check = check_selected_model(settings, &credentials);
    model_check.print();
    checks.push(model_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using tldw.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! tldw is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available, reporting `missing` when it is not.
fn check_tool(name: &str, hint: &str, missing: CheckStatus) -> CheckResult {
    let not_found = |message: &str| match missing {
        CheckStatus::Error => CheckResult::error(name, message, hint),
        _ => CheckResult::warning(name, message, hint),
    };

    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .chars()
                .take(50)
                .collect::<String>();
            CheckResult::ok(name, &version)
        }
        Ok(_) => not_found("installed but not working"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => not_found("not found"),
        Err(e) => not_found(&format!("error: {}", e)),
    }
}

/// yt-dlp is only needed when a transcript has to be fetched.
fn check_ytdlp() -> CheckResult {
    let hint = format!(
        "Only needed to fetch transcripts, not for --transcript files or the cache. {}",
        install_hint_ytdlp()
    );
    check_tool(YT_DLP, &hint, CheckStatus::Warning)
}

/// Report whether a provider key is configured, masked.
fn check_api_key(credentials: &Credentials, provider: Provider) -> CheckResult {
    let var = Credentials::env_var(provider);
    match credentials.key_for(provider) {
        Some(key) => CheckResult::ok(var, &format!("configured ({})", mask_key(key))),
        None => CheckResult::warning(
            var,
            "not set",
            &format!("Needed for {} models. Set with: export {}='...'", provider, var),
        ),
    }
}

/// Check that a model is selected and its provider is reachable.
fn check_selected_model(settings: &Settings, credentials: &Credentials) -> CheckResult {
    let Some(id) = settings.model.selected.as_deref() else {
        return CheckResult::warning("Model", "none selected", "Pick one with: tldw setup");
    };

    let Some(model) = settings.resolve_model(id) else {
        return CheckResult::error(
            "Model",
            &format!("{} is not in the catalog", id),
            "Pick another with: tldw models list",
        );
    };

    let label = format!("{} via {}", model.id, model.provider);
    match crate::cli::preflight::check_provider(&model, credentials) {
        Ok(()) => CheckResult::ok("Model", &label),
        Err(e) => CheckResult::error("Model", &label, &e.to_string()),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning("Config file", "using defaults", "Create with: tldw setup")
    }
}

/// Keep only the first and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
