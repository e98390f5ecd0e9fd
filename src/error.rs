//! Error types for tldw.

use thiserror::Error;

/// Library-level error type for tldw operations.
#[derive(Error, Debug)]
pub enum TldwError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication, transport or API failure from an LLM provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Model output that is not decodable structured data.
    #[error("Could not parse model response: {0}")]
    Parse(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for tldw operations.
pub type Result<T> = std::result::Result<T, TldwError>;
