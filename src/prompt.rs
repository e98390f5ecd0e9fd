//! Prompt rendering for summarization, retry and merge calls.
//!
//! Templates come from [`Prompts`]; the transcript block and the exact-quote
//! reminder are fixed parts of every rendered summary prompt.

use crate::config::Prompts;
use crate::error::Result;
use crate::summary::Summary;
use std::collections::HashMap;

/// Reminder closing every summary prompt. Quote validation depends on it.
pub const QUOTE_REMINDER: &str = "Remember: every \"quote\" field MUST be an exact copy-paste from the transcript above. Do not change even a single word. Return ONLY valid JSON.";

const JSON_ONLY: &str = "Return ONLY valid JSON.";

/// Renders prompts from a set of templates.
pub struct PromptBuilder<'a> {
    prompts: &'a Prompts,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(prompts: &'a Prompts) -> Self {
        Self { prompts }
    }

    /// Substitute config variables, then the call-specific values.
    ///
    /// Config variables never shadow a call-specific key, and the values go
    /// in last so text inside them is never treated as a template.
    fn fill(&self, template: &str, values: &[(&str, &str)]) -> String {
        let vars: HashMap<String, String> = self
            .prompts
            .variables
            .iter()
            .filter(|(name, _)| !values.iter().any(|(key, _)| key == name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        values
            .iter()
            .fold(Prompts::render(template, &vars), |text, (key, value)| {
                text.replace(&format!("{{{{{}}}}}", key), value)
            })
    }

    /// System prompt for summarizing a transcript or one chunk of it.
    pub fn summary_system(&self) -> String {
        self.prompts
            .render_with_custom(&self.prompts.summary.system, &HashMap::new())
    }

    /// System prompt for merging partial summaries.
    pub fn merge_system(&self) -> String {
        self.prompts
            .render_with_custom(&self.prompts.merge.system, &HashMap::new())
    }

    /// User prompt over a transcript block, with an optional viewer question.
    pub fn render(&self, transcript_text: &str, focus: Option<&str>) -> String {
        let focus_instruction = match normalize_focus(focus) {
            Some(question) => {
                self.fill(&self.prompts.summary.focus_specific, &[("prompt", question)])
            }
            None => self
                .prompts
                .render_with_custom(&self.prompts.summary.focus_general, &HashMap::new()),
        };

        format!(
            "Here's the video transcript:\n\n{}\n\n{}\n\n{}",
            transcript_text, focus_instruction, QUOTE_REMINDER
        )
    }

    /// Retry message listing quotes that could not be found.
    pub fn retry(&self, bad_quotes: &[String]) -> String {
        let listed = bad_quotes
            .iter()
            .map(|q| format!("- \"{}\"", q))
            .collect::<Vec<_>>()
            .join("\n");
        self.fill(&self.prompts.summary.retry, &[("bad_quotes", &listed)])
    }

    /// User prompt asking the model to merge partial summaries.
    pub fn merge(&self, partials: &[Summary], focus: Option<&str>) -> Result<String> {
        let partials_json = serde_json::to_string_pretty(partials)?;

        let count = partials.len().to_string();
        let mut prompt = self.fill(
            &self.prompts.merge.user,
            &[("count", &count), ("partials", &partials_json)],
        );
        if let Some(question) = normalize_focus(focus) {
            prompt.push_str("\n\n");
            prompt.push_str(&self.fill(&self.prompts.merge.focus, &[("prompt", question)]));
        }
        prompt.push_str("\n\n");
        prompt.push_str(JSON_ONLY);

        Ok(prompt)
    }
}

/// Treat blank questions as no question.
fn normalize_focus(focus: Option<&str>) -> Option<&str> {
    focus.filter(|f| !f.trim().is_empty())
}
