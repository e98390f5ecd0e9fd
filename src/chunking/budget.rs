//! Context window budgets.

use crate::config::LlmSettings;

/// Context windows of known provider model identifiers, in tokens.
pub const KNOWN_CONTEXT_LIMITS: &[(&str, u32)] = &[
    ("claude-opus-4-5-20251101", 200_000),
    ("gpt-5", 128_000),
];

/// How much transcript text fits into one model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    pub context_tokens: u32,
    pub reserved_tokens: u32,
    pub chars_per_token: u32,
}

impl ContextBudget {
    /// Budget for a provider model identifier.
    ///
    /// Configured limits win over the built-in table; unknown models use the
    /// configured default window.
    pub fn for_model(model: &str, settings: &LlmSettings) -> Self {
        let context_tokens = settings
            .context_limits
            .get(model)
            .copied()
            .or_else(|| {
                KNOWN_CONTEXT_LIMITS
                    .iter()
                    .find(|(id, _)| *id == model)
                    .map(|(_, limit)| *limit)
            })
            .unwrap_or(settings.default_context_tokens);

        Self {
            context_tokens,
            reserved_tokens: settings.reserved_tokens,
            chars_per_token: settings.chars_per_token,
        }
    }

    /// Maximum transcript characters: `(context - reserved) * chars_per_token`.
    pub fn max_transcript_chars(&self) -> usize {
        self.context_tokens.saturating_sub(self.reserved_tokens) as usize
            * self.chars_per_token as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model() {
        let budget = ContextBudget::for_model("claude-opus-4-5-20251101", &LlmSettings::default());
        assert_eq!(budget.context_tokens, 200_000);
        assert_eq!(budget.max_transcript_chars(), 776_000);
    }

    #[test]
    fn test_unknown_model_uses_default() {
        let budget = ContextBudget::for_model("some-unknown-model", &LlmSettings::default());
        assert_eq!(budget.max_transcript_chars(), 488_000);
    }

    #[test]
    fn test_configured_limit_overrides_table() {
        let mut settings = LlmSettings::default();
        settings.context_limits.insert("gpt-5".to_string(), 400_000);
        let budget = ContextBudget::for_model("gpt-5", &settings);
        assert_eq!(budget.max_transcript_chars(), (400_000 - 6000) * 4);
    }

    #[test]
    fn test_reserved_larger_than_window() {
        let mut settings = LlmSettings::default();
        settings.context_limits.insert("tiny".to_string(), 100);
        assert_eq!(ContextBudget::for_model("tiny", &settings).max_transcript_chars(), 0);
    }
}
