//! Model catalog and provider selection.

use serde::{Deserialize, Serialize};

/// Model id used when the user has not picked one.
pub const DEFAULT_MODEL_ID: &str = "google/gemini-3-flash-preview";

/// LLM provider behind a model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAI,
    OpenRouter,
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            "openrouter" => Ok(Provider::OpenRouter),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Anthropic => write!(f, "anthropic"),
            Provider::OpenAI => write!(f, "openai"),
            Provider::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// A selectable model: which provider to call and with which identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// User-facing id (e.g. "openai/gpt-5").
    pub id: String,
    /// Display name.
    pub name: String,
    pub provider: Provider,
    /// Provider-specific model identifier.
    pub model: String,
}

impl ModelConfig {
    pub fn new(id: &str, name: &str, provider: Provider, model: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider,
            model: model.to_string(),
        }
    }

    /// A user-supplied model that is not in the catalog.
    pub fn custom(id: &str, provider: Provider) -> Self {
        Self::new(id, &format!("{} (custom)", id), provider, id)
    }
}

const OPENROUTER_MODELS: &[(&str, &str)] = &[
    ("google/gemini-3-flash-preview", "Gemini 3 Flash Preview"),
    ("google/gemini-3-pro-preview", "Gemini 3 Pro Preview"),
    ("google/gemini-2.5-flash", "Gemini 2.5 Flash"),
    ("google/gemini-2.5-pro", "Gemini 2.5 Pro"),
    ("anthropic/claude-sonnet-4.5", "Claude Sonnet 4.5"),
    ("anthropic/claude-opus-4.5", "Claude Opus 4.5"),
    ("anthropic/claude-haiku-4.5", "Claude Haiku 4.5"),
    ("openai/gpt-5-mini", "GPT-5 Mini"),
    ("openai/gpt-4.1", "GPT-4.1"),
    ("x-ai/grok-4", "Grok 4"),
    ("x-ai/grok-4-fast", "Grok 4 Fast"),
    ("deepseek/deepseek-chat-v3.1", "DeepSeek V3.1"),
    ("meta-llama/llama-3.3-70b-instruct", "Llama 3.3 70B Instruct"),
    ("mistralai/mistral-large", "Mistral Large"),
    ("qwen/qwen3-235b-a22b", "Qwen3 235B"),
    ("moonshotai/kimi-k2", "Kimi K2"),
];

/// All built-in models: direct providers first, then OpenRouter.
pub fn available_models() -> Vec<ModelConfig> {
    let mut models = vec![
        ModelConfig::new(
            "anthropic/claude-opus-4",
            "Claude Opus 4 (Anthropic)",
            Provider::Anthropic,
            "claude-opus-4-5-20251101",
        ),
        ModelConfig::new("openai/gpt-5", "GPT-5 (OpenAI)", Provider::OpenAI, "gpt-5"),
    ];

    models.extend(OPENROUTER_MODELS.iter().map(|(id, name)| {
        ModelConfig::new(id, &format!("{} (OpenRouter)", name), Provider::OpenRouter, id)
    }));

    models
}

/// Look up a catalog model by id.
pub fn find_model(id: &str) -> Option<ModelConfig> {
    available_models().into_iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_direct_providers() {
        let anthropic = find_model("anthropic/claude-opus-4").unwrap();
        assert_eq!(anthropic.provider, Provider::Anthropic);
        assert_eq!(anthropic.model, "claude-opus-4-5-20251101");

        let openai = find_model("openai/gpt-5").unwrap();
        assert_eq!(openai.provider, Provider::OpenAI);
    }

    #[test]
    fn test_catalog_openrouter_models() {
        let openrouter: Vec<_> = available_models()
            .into_iter()
            .filter(|m| m.provider == Provider::OpenRouter)
            .collect();
        assert!(openrouter.len() >= 16);
        assert!(openrouter.iter().all(|m| m.model == m.id));
    }

    #[test]
    fn test_catalog_ids_unique_and_default_present() {
        let models = available_models();
        let ids: HashSet<_> = models.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), models.len());
        assert!(ids.contains(DEFAULT_MODEL_ID));
    }

    #[test]
    fn test_provider_parse_and_display() {
        assert_eq!("OpenRouter".parse::<Provider>().unwrap(), Provider::OpenRouter);
        assert_eq!(Provider::OpenAI.to_string(), "openai");
        assert!("google".parse::<Provider>().is_err());
    }

    #[test]
    fn test_custom_model() {
        let model = ModelConfig::custom("my-org/my-model", Provider::OpenRouter);
        assert_eq!(model.name, "my-org/my-model (custom)");
        assert_eq!(model.model, "my-org/my-model");
    }
}
