//! Anthropic Messages API.

use super::ModelGateway;
use crate::config::ModelConfig;
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Gateway calling the Anthropic API with an API key.
pub struct AnthropicGateway {
    api_key: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl AnthropicGateway {
    pub fn new(api_key: &str, max_tokens: u32, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TldwError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.to_string(),
            max_tokens,
            client,
        })
    }
}

/// The first text block of a Messages API response.
fn first_text(response: MessagesResponse) -> Result<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| TldwError::Provider("Empty response from Anthropic".to_string()))
}

#[async_trait]
impl ModelGateway for AnthropicGateway {
    #[instrument(skip(self, system, user, model), fields(model = %model.model))]
    async fn complete(&self, system: &str, user: &str, model: &ModelConfig) -> Result<String> {
        let body = MessagesRequest {
            model: &model.model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let res = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| TldwError::Provider(format!("Anthropic request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(TldwError::Provider(format!(
                "Anthropic API error {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = res
            .json()
            .await
            .map_err(|e| TldwError::Provider(format!("Anthropic response parse failed: {}", e)))?;

        let text = first_text(parsed)?;
        debug!("Received {} characters", text.chars().count());
        Ok(text)
    }
}
