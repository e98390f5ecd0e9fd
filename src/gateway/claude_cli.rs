//! Fallback through the locally installed `claude` CLI.
//!
//! Used for Anthropic models when no API key is configured; the CLI brings
//! its own authentication.

use super::ModelGateway;
use crate::config::ModelConfig;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Name of the CLI binary.
pub const CLAUDE_CLI: &str = "claude";

/// Model alias passed to the CLI.
const CLI_MODEL: &str = "opus";

/// Gateway that shells out to `claude -p`.
pub struct ClaudeCliGateway {
    program: String,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl ClaudeCliGateway {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(CLAUDE_CLI, Vec::new(), timeout)
    }

    /// Run `program` with `leading_args` before the usual CLI arguments.
    pub fn with_program(
        program: impl Into<String>,
        leading_args: Vec<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args,
            timeout,
        }
    }

    /// The CLI takes a single prompt, so the system prompt is inlined.
    fn full_prompt(system: &str, user: &str) -> String {
        format!("System instructions: {}\n\n{}", system, user)
    }

    fn args(prompt: &str) -> Vec<&str> {
        vec![
            "-p",
            "--model",
            CLI_MODEL,
            "--output-format",
            "text",
            "--no-session-persistence",
            prompt,
        ]
    }
}

#[async_trait]
impl ModelGateway for ClaudeCliGateway {
    #[instrument(skip_all)]
    async fn complete(&self, system: &str, user: &str, _model: &ModelConfig) -> Result<String> {
        let prompt = Self::full_prompt(system, user);

        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(Self::args(&prompt))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TldwError::Provider(format!(
                    "{} CLI not found. Install it or set ANTHROPIC_API_KEY.",
                    self.program
                )));
            }
            Err(e) => {
                return Err(TldwError::Provider(format!(
                    "Failed to start {} CLI: {}",
                    self.program, e
                )));
            }
        };

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                TldwError::Provider(format!(
                    "{} CLI timed out after {:?}",
                    self.program, self.timeout
                ))
            })?
            .map_err(|e| TldwError::Provider(format!("{} CLI failed: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TldwError::Provider(format!(
                "{} CLI failed: {}",
                self.program,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Received {} characters from CLI", text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_prompt_inlines_system() {
        let prompt = ClaudeCliGateway::full_prompt("sys rules", "the transcript");
        assert_eq!(prompt, "System instructions: sys rules\n\nthe transcript");
    }

    #[test]
    fn test_args_end_with_prompt() {
        let args = ClaudeCliGateway::args("hello");
        assert_eq!(args.first(), Some(&"-p"));
        assert!(args.contains(&"--no-session-persistence"));
        assert_eq!(args.last(), Some(&"hello"));
    }

    fn shell(script: &str, timeout: Duration) -> ClaudeCliGateway {
        ClaudeCliGateway::with_program("sh", vec!["-c".to_string(), script.to_string()], timeout)
    }

    fn model() -> ModelConfig {
        ModelConfig::custom("anthropic/claude-opus-4.5", crate::config::Provider::Anthropic)
    }

    #[tokio::test]
    async fn test_stdout_is_trimmed_response() {
        let gateway = shell("echo '  {\"one_liner\": \"x\"}  '", Duration::from_secs(10));
        let text = gateway.complete("sys", "user", &model()).await.unwrap();
        assert_eq!(text, "{\"one_liner\": \"x\"}");
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let gateway = shell("echo boom >&2; exit 3", Duration::from_secs(10));
        match gateway.complete("sys", "user", &model()).await {
            Err(TldwError::Provider(msg)) => assert!(msg.contains("boom")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_cli_times_out() {
        let gateway = shell("sleep 5", Duration::from_millis(100));
        let started = std::time::Instant::now();
        match gateway.complete("sys", "user", &model()).await {
            Err(TldwError::Provider(msg)) => assert!(msg.contains("timed out")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_missing_cli_is_provider_error() {
        let gateway = ClaudeCliGateway::with_program(
            "definitely-not-a-real-tool-tldw",
            Vec::new(),
            Duration::from_secs(1),
        );
        match gateway.complete("sys", "user", &model()).await {
            Err(TldwError::Provider(msg)) => assert!(msg.contains("not found")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
