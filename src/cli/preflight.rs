//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and credentials are available before
//! starting a summary that would otherwise fail midway.

use crate::config::{Credentials, ModelConfig, Provider};
use crate::error::{Result, TldwError};
use crate::gateway::CLAUDE_CLI;
use std::process::Command;

/// Name of the subtitle downloader.
pub const YT_DLP: &str = "yt-dlp";

/// Check that the model's provider can be called.
///
/// Anthropic works with either an API key or the `claude` CLI.
pub fn check_provider(model: &ModelConfig, credentials: &Credentials) -> Result<()> {
    if credentials.key_for(model.provider).is_some() {
        return Ok(());
    }

    match model.provider {
        Provider::Anthropic => check_tool(CLAUDE_CLI).map_err(|_| {
            TldwError::Config(format!(
                "{} needs {} or the `{}` CLI. Set it with: export {}='...'",
                model.id,
                Credentials::env_var(Provider::Anthropic),
                CLAUDE_CLI,
                Credentials::env_var(Provider::Anthropic)
            ))
        }),
        provider => {
            let var = Credentials::env_var(provider);
            Err(TldwError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                var, var
            )))
        }
    }
}

/// Check that transcripts can be fetched.
pub fn check_transcript_fetch() -> Result<()> {
    check_tool(YT_DLP)
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TldwError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TldwError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TldwError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
