//! Models command implementation.

use super::setup::adopt_custom_model;
use crate::cli::{ModelsAction, Output};
use crate::config::{available_models, find_model, Provider, Settings, DEFAULT_MODEL_ID};
use crate::gateway::ModelGateway;
use anyhow::{bail, Result};
use console::style;
use std::path::Path;

/// Run the models command.
pub async fn run_models(
    action: &ModelsAction,
    mut settings: Settings,
    config_path: &Path,
    gateway: &dyn ModelGateway,
) -> Result<()> {
    match action {
        ModelsAction::List => {
            let selected = settings.model.selected.as_deref();
            Output::header("Available models");
            for model in available_models() {
                let mut tags = Vec::new();
                if Some(model.id.as_str()) == selected {
                    tags.push(style("(selected)").green().to_string());
                }
                if model.id == DEFAULT_MODEL_ID {
                    tags.push(style("(default)").yellow().to_string());
                }
                Output::list_item(&format!(
                    "{}  {} [{}] {}",
                    model.id,
                    style(&model.name).dim(),
                    model.provider,
                    tags.join(" ")
                ));
            }
            if let Some(custom) = &settings.model.custom {
                let tag = if Some(custom.id.as_str()) == selected {
                    style("(selected)").green().to_string()
                } else {
                    String::new()
                };
                Output::list_item(&format!(
                    "{}  {} [{}] {}",
                    custom.id,
                    style("custom").dim(),
                    custom.provider,
                    tag
                ));
            }
        }

        ModelsAction::Set { id } => {
            let is_custom = settings.model.custom.as_ref().is_some_and(|c| &c.id == id);
            if find_model(id).is_none() && !is_custom {
                bail!(
                    "Unknown model: {}. Run 'tldw models list', or add it with \
                     'tldw models custom {} --provider <provider>'.",
                    id,
                    id
                );
            }
            settings.set_selected_model(id);
            settings.save_to(config_path)?;
            Output::success(&format!("Set model to {}", id));
        }

        ModelsAction::Custom { id, provider } => {
            let provider: Provider = provider.parse().map_err(anyhow::Error::msg)?;
            if let Err(e) = adopt_custom_model(&mut settings, id, provider, gateway).await {
                bail!("Cannot use this model: {}", e);
            }
            settings.save_to(config_path)?;
            Output::success(&format!("Set custom model {} via {}", id, provider));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::error::TldwError;
    use async_trait::async_trait;

    struct RejectingGateway;

    #[async_trait]
    impl ModelGateway for RejectingGateway {
        async fn complete(&self, _: &str, _: &str, _: &ModelConfig) -> crate::Result<String> {
            Err(TldwError::Provider("model not found".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unvalidated_custom_model_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        let action = ModelsAction::Custom {
            id: "nope/nothing".to_string(),
            provider: "openrouter".to_string(),
        };

        let err = run_models(&action, Settings::default(), &config_path, &RejectingGateway)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("model not found"));
        assert!(!config_path.exists());
    }
}
