//! Model gateway: one text completion per call, routed by provider.
//!
//! Each call sends a system prompt and a user prompt and returns the raw
//! response text. Gateways never retry; errors surface to the caller.

mod anthropic;
mod claude_cli;
mod openai;

pub use anthropic::AnthropicGateway;
pub use claude_cli::{ClaudeCliGateway, CLAUDE_CLI};
pub use openai::{create_client_with_timeout, OpenAiCompatibleGateway, OPENROUTER_API_BASE};

use crate::config::{Credentials, LlmSettings, ModelConfig, Provider};
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Timeout for HTTP provider requests (5 minutes).
const HTTP_TIMEOUT_SECS: u64 = 300;

/// Trait for anything that can turn a prompt pair into model output.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send one completion request and return the response text.
    async fn complete(&self, system: &str, user: &str, model: &ModelConfig) -> Result<String>;
}

/// Check that a model answers at all, with one tiny completion.
pub async fn validate_model(model: &ModelConfig, gateway: &dyn ModelGateway) -> Result<()> {
    gateway
        .complete("Reply with the single word OK.", "ping", model)
        .await
        .map(|_| ())
        .map_err(|e| match e {
            TldwError::Provider(msg) => TldwError::Provider(msg),
            other => TldwError::Provider(other.to_string()),
        })
}

/// Gateway that dispatches to the adapter for the model's provider.
pub struct ProviderGateway {
    credentials: Credentials,
    max_tokens: u32,
    cli: ClaudeCliGateway,
}

impl ProviderGateway {
    pub fn new(credentials: Credentials, llm: &LlmSettings) -> Self {
        Self {
            credentials,
            max_tokens: llm.max_tokens,
            cli: ClaudeCliGateway::new(Duration::from_secs(llm.cli_timeout_secs)),
        }
    }

    /// Replace the CLI used for Anthropic models without an API key.
    pub fn with_cli(mut self, cli: ClaudeCliGateway) -> Self {
        self.cli = cli;
        self
    }

    fn require_key(&self, provider: Provider) -> Result<&str> {
        self.credentials.key_for(provider).ok_or_else(|| {
            TldwError::Provider(format!(
                "{} is not set. Export it or pick a different model with `tldw models set`.",
                Credentials::env_var(provider)
            ))
        })
    }
}

#[async_trait]
impl ModelGateway for ProviderGateway {
    async fn complete(&self, system: &str, user: &str, model: &ModelConfig) -> Result<String> {
        let timeout = Duration::from_secs(HTTP_TIMEOUT_SECS);

        match model.provider {
            Provider::Anthropic => match self.credentials.key_for(Provider::Anthropic) {
                Some(key) => {
                    debug!("Calling Anthropic API for {}", model.model);
                    AnthropicGateway::new(key, self.max_tokens, timeout)?
                        .complete(system, user, model)
                        .await
                }
                None => {
                    debug!("No Anthropic key, falling back to the {} CLI", CLAUDE_CLI);
                    self.cli.complete(system, user, model).await
                }
            },
            Provider::OpenAI => {
                let key = self.require_key(Provider::OpenAI)?;
                debug!("Calling OpenAI API for {}", model.model);
                OpenAiCompatibleGateway::openai(key, self.max_tokens, timeout)?
                    .complete(system, user, model)
                    .await
            }
            Provider::OpenRouter => {
                let key = self.require_key(Provider::OpenRouter)?;
                debug!("Calling OpenRouter for {}", model.model);
                OpenAiCompatibleGateway::openrouter(key, self.max_tokens, timeout)?
                    .complete(system, user, model)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(credentials: Credentials) -> ProviderGateway {
        ProviderGateway::new(credentials, &LlmSettings::default())
    }

    #[tokio::test]
    async fn test_anthropic_without_key_uses_cli() {
        let model = ModelConfig::custom("anthropic/claude-opus-4.5", Provider::Anthropic);
        let cli = ClaudeCliGateway::with_program(
            "sh",
            vec!["-c".to_string(), "echo from-cli".to_string()],
            Duration::from_secs(10),
        );
        let text = gateway(Credentials::default())
            .with_cli(cli)
            .complete("sys", "user", &model)
            .await
            .unwrap();
        assert_eq!(text, "from-cli");
    }

    #[tokio::test]
    async fn test_validate_model_reports_provider_failure() {
        let model = ModelConfig::custom("x-ai/grok-4", Provider::OpenRouter);
        let err = validate_model(&model, &gateway(Credentials::default()))
            .await
            .unwrap_err();
        match err {
            TldwError::Provider(msg) => assert!(msg.contains("OPENROUTER_API_KEY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validate_model_accepts_a_response() {
        let model = ModelConfig::custom("anthropic/claude-opus-4.5", Provider::Anthropic);
        let cli = ClaudeCliGateway::with_program(
            "sh",
            vec!["-c".to_string(), "echo OK".to_string()],
            Duration::from_secs(10),
        );
        let gateway = gateway(Credentials::default()).with_cli(cli);
        assert!(validate_model(&model, &gateway).await.is_ok());
    }

    #[tokio::test]
    async fn test_openai_without_key_fails_fast() {
        let model = ModelConfig::new("openai/gpt-5", "GPT-5", Provider::OpenAI, "gpt-5");
        let err = gateway(Credentials::default())
            .complete("sys", "user", &model)
            .await
            .unwrap_err();
        match err {
            TldwError::Provider(msg) => assert!(msg.contains("OPENAI_API_KEY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_openrouter_without_key_fails_fast() {
        let model = ModelConfig::custom("x-ai/grok-4", Provider::OpenRouter);
        // An OpenAI key does not unlock OpenRouter.
        let creds = Credentials {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let err = gateway(creds).complete("sys", "user", &model).await.unwrap_err();
        match err {
            TldwError::Provider(msg) => assert!(msg.contains("OPENROUTER_API_KEY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
