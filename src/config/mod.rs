//! Configuration module for tldw.
//!
//! Handles application settings, the model catalog, provider credentials and
//! prompt templates.

mod credentials;
mod models;
mod prompts;
mod settings;

pub use credentials::Credentials;
pub use models::{available_models, find_model, ModelConfig, Provider, DEFAULT_MODEL_ID};
pub use prompts::{MergePrompts, Prompts, SummaryPrompts};
pub use settings::{
    CustomModel, GeneralSettings, LlmSettings, ModelSettings, PromptSettings, Settings,
    TranscriptSettings,
};
