//! Configuration settings for tldw.

use super::models::{find_model, ModelConfig, Provider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub llm: LlmSettings,
    pub transcript: TranscriptSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where fetched transcripts are cached.
    pub cache_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("tldw").to_string_lossy().into_owned(),
            log_level: "warn".to_string(),
        }
    }
}

/// Persisted model selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelSettings {
    /// Id of the selected model.
    pub selected: Option<String>,
    /// A model outside the built-in catalog.
    pub custom: Option<CustomModel>,
}

/// Descriptor for a user-supplied model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomModel {
    pub id: String,
    pub provider: Provider,
}

/// LLM call and context budget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Re-prompts allowed when quotes fail validation.
    pub max_retries: u32,
    /// Response token limit sent to the provider.
    pub max_tokens: u32,
    /// Bound on the `claude` CLI fallback, in seconds.
    pub cli_timeout_secs: u64,
    /// Tokens held back for instructions and the response.
    pub reserved_tokens: u32,
    /// Rough characters-per-token ratio.
    pub chars_per_token: u32,
    /// Context window for models without a known profile.
    pub default_context_tokens: u32,
    /// Extra or overriding context windows, keyed by provider model identifier.
    pub context_limits: HashMap<String, u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_tokens: 4096,
            cli_timeout_secs: 120,
            reserved_tokens: 6000,
            chars_per_token: 4,
            default_context_tokens: 128_000,
            context_limits: HashMap::new(),
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Subtitle languages, in preference order.
    pub languages: Vec<String>,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TldwError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tldw")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded transcript cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.cache_dir)
    }

    /// Resolve the selected model against the catalog, then the custom descriptor.
    pub fn selected_model(&self) -> Option<ModelConfig> {
        let id = self.model.selected.as_deref()?;
        self.resolve_model(id)
    }

    /// Resolve any model id: catalog, then the persisted custom model.
    pub fn resolve_model(&self, id: &str) -> Option<ModelConfig> {
        find_model(id).or_else(|| {
            self.model
                .custom
                .as_ref()
                .filter(|c| c.id == id)
                .map(|c| ModelConfig::custom(&c.id, c.provider))
        })
    }

    /// Select a model by id.
    pub fn set_selected_model(&mut self, id: &str) {
        self.model.selected = Some(id.to_string());
    }

    /// Record a custom model and select it.
    pub fn set_custom_model(&mut self, id: &str, provider: Provider) {
        self.model.custom = Some(CustomModel {
            id: id.to_string(),
            provider,
        });
        self.model.selected = Some(id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert!(settings.model.selected.is_none());
        assert_eq!(settings.llm.max_retries, 2);
        assert!(settings.selected_model().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut settings = Settings::default();
        settings.set_selected_model("openai/gpt-5");
        settings.llm.context_limits.insert("gpt-5".to_string(), 400_000);
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.model.selected.as_deref(), Some("openai/gpt-5"));
        assert_eq!(loaded.llm.context_limits.get("gpt-5"), Some(&400_000));

        let model = loaded.selected_model().unwrap();
        assert_eq!(model.provider, Provider::OpenAI);
    }

    #[test]
    fn test_openrouter_selection() {
        let mut settings = Settings::default();
        settings.set_selected_model("google/gemini-3-flash-preview");
        assert_eq!(settings.selected_model().unwrap().provider, Provider::OpenRouter);
    }

    #[test]
    fn test_custom_model_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.set_custom_model("my-org/my-model", Provider::OpenRouter);
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        let model = loaded.selected_model().unwrap();
        assert_eq!(model.id, "my-org/my-model");
        assert_eq!(model.provider, Provider::OpenRouter);
    }

    #[test]
    fn test_unknown_selection_is_none() {
        let mut settings = Settings::default();
        settings.set_selected_model("nonexistent/model");
        assert!(settings.selected_model().is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = toml::from_str("[llm]\nmax_retries = 5\n").unwrap();
        assert_eq!(settings.llm.max_retries, 5);
        assert_eq!(settings.llm.reserved_tokens, 6000);
        assert_eq!(settings.transcript.languages, vec!["en".to_string()]);
    }
}
