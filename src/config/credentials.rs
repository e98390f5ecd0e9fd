//! Provider credentials.

use super::Provider;

pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";

/// API keys for each provider. Absent keys are `None`.
#[derive(Clone, Default)]
pub struct Credentials {
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
}

impl Credentials {
    /// Read keys from the process environment. Empty values count as absent.
    pub fn from_env() -> Self {
        Self {
            anthropic_api_key: read_key(ANTHROPIC_API_KEY),
            openai_api_key: read_key(OPENAI_API_KEY),
            openrouter_api_key: read_key(OPENROUTER_API_KEY),
        }
    }

    /// Key for a provider, if configured.
    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::OpenRouter => self.openrouter_api_key.as_deref(),
        }
    }

    /// Environment variable that holds a provider's key.
    pub fn env_var(provider: Provider) -> &'static str {
        match provider {
            Provider::Anthropic => ANTHROPIC_API_KEY,
            Provider::OpenAI => OPENAI_API_KEY,
            Provider::OpenRouter => OPENROUTER_API_KEY,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "***"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("openrouter_api_key", &self.openrouter_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

fn read_key(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for() {
        let creds = Credentials {
            openai_api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert_eq!(creds.key_for(Provider::OpenAI), Some("sk-test"));
        assert_eq!(creds.key_for(Provider::Anthropic), None);
        assert_eq!(Credentials::env_var(Provider::OpenRouter), "OPENROUTER_API_KEY");
    }

    #[test]
    fn test_debug_masks_keys() {
        let creds = Credentials {
            anthropic_api_key: Some("secret-value".to_string()),
            ..Default::default()
        };
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("secret-value"));
        assert!(shown.contains("***"));
    }
}
