//! Chat completions through OpenAI and OpenAI-compatible APIs.

use super::ModelGateway;
use crate::config::ModelConfig;
use crate::error::{Result, TldwError};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// OpenRouter's OpenAI-compatible endpoint.
pub const OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

/// Create a client for the given config with a request timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TldwError::Provider(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}

/// How the response length limit is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenLimit {
    /// `max_completion_tokens`, required by newer OpenAI models.
    Completion,
    /// Classic `max_tokens`, which OpenRouter forwards to every upstream.
    Legacy,
}

/// Gateway for OpenAI and OpenRouter chat completions.
pub struct OpenAiCompatibleGateway {
    client: Client<OpenAIConfig>,
    max_tokens: u32,
    token_limit: TokenLimit,
    label: &'static str,
}

impl OpenAiCompatibleGateway {
    pub fn openai(api_key: &str, max_tokens: u32, timeout: Duration) -> Result<Self> {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Ok(Self {
            client: create_client_with_timeout(config, timeout)?,
            max_tokens,
            token_limit: TokenLimit::Completion,
            label: "OpenAI",
        })
    }

    pub fn openrouter(api_key: &str, max_tokens: u32, timeout: Duration) -> Result<Self> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(OPENROUTER_API_BASE);
        Ok(Self {
            client: create_client_with_timeout(config, timeout)?,
            max_tokens,
            token_limit: TokenLimit::Legacy,
            label: "OpenRouter",
        })
    }
}

#[async_trait]
impl ModelGateway for OpenAiCompatibleGateway {
    #[instrument(skip(self, system, user, model), fields(provider = self.label, model = %model.model))]
    async fn complete(&self, system: &str, user: &str, model: &ModelConfig) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| TldwError::Provider(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| TldwError::Provider(e.to_string()))?
                .into(),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&model.model).messages(messages);
        match self.token_limit {
            TokenLimit::Completion => {
                args.max_completion_tokens(self.max_tokens);
            }
            TokenLimit::Legacy => {
                #[allow(deprecated)]
                args.max_tokens(self.max_tokens);
            }
        }
        let request = args
            .build()
            .map_err(|e| TldwError::Provider(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TldwError::Provider(format!("{} request failed: {}", self.label, e))
        })?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TldwError::Provider(format!("Empty response from {}", self.label)))?
            .clone();

        debug!("Received {} characters", content.chars().count());
        Ok(content)
    }
}
