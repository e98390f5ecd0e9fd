//! Prompt templates for tldw.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for summarizing a transcript (or one chunk of it).
    pub summary: SummaryPrompts,
    /// Prompts for merging partial summaries of a chunked transcript.
    pub merge: MergePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for single-pass summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    /// Instruction used when the viewer asked nothing in particular.
    pub focus_general: String,
    /// Instruction used with a viewer question, available as {{prompt}}.
    pub focus_specific: String,
    /// Re-prompt for quotes that failed validation, listed as {{bad_quotes}}.
    pub retry: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a super chill video summarizer. Your vibe is laid back, friendly, and conversational -- like you're telling a friend about a video you just watched. Keep it real, keep it casual.

You will be given a transcript of a YouTube video. Your job is to summarize it.

IMPORTANT RULES:
1. Return your response as valid JSON only -- no markdown, no code fences, no extra text.
2. Every quote you provide MUST be an EXACT substring from the transcript. Do not paraphrase, rearrange, or fabricate quotes. Copy them word-for-word from the transcript text provided.
3. Each section should reference a specific part of the video with an exact quote.

Return a JSON object with this exact structure:
{
  "one_liner": "A single casual phrase summarizing the whole video",
  "sections": [
    {
      "title": "Section title",
      "summary": "A chill, detailed summary of this part (2-4 sentences)",
      "quote": "exact words copied from the transcript that back up this section",
      "timestamp_hint": "rough description of when this happens"
    }
  ]
}

Keep the tone relaxed and conversational throughout. Like you're just vibing and breaking it down for a buddy."#.to_string(),

            focus_general: "Give me a general summary of the whole video, breaking it into the main topics covered.".to_string(),

            focus_specific: r#"The viewer specifically wants to know: "{{prompt}}". Focus your summary primarily on parts of the video related to this, but also briefly cover other major topics."#.to_string(),

            retry: r#"Some of your quotes were not found in the original transcript. Here are the invalid quotes:

{{bad_quotes}}

Please provide new exact quotes from the transcript for those sections. Remember: quotes must be EXACT substrings from the transcript -- copy them word for word.

Return the full JSON response again with corrected quotes. Return ONLY valid JSON, no markdown fences."#.to_string(),
        }
    }
}

/// Prompts for merging partial summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePrompts {
    pub system: String,
    /// Merge request, with {{count}} and {{partials}} (pretty JSON).
    pub user: String,
    /// Appended when the viewer asked a question, available as {{prompt}}.
    pub focus: String,
}

impl Default for MergePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a super chill video summarizer. You will be given multiple partial summaries of different parts of a YouTube video. Merge them into one cohesive summary.

IMPORTANT RULES:
1. Return your response as valid JSON only -- no markdown, no code fences, no extra text.
2. Every quote you provide MUST be an EXACT substring taken directly from the partial summaries' quotes. Do not fabricate new quotes.
3. Keep the best and most relevant sections from each partial summary.
4. Deduplicate overlapping topics.

Return a JSON object with this exact structure:
{
  "one_liner": "A single casual phrase summarizing the whole video",
  "sections": [
    {
      "title": "Section title",
      "summary": "A chill, detailed summary of this part (2-4 sentences)",
      "quote": "exact words from a partial summary quote",
      "timestamp_hint": "rough description of when this happens"
    }
  ]
}

Keep the tone relaxed and conversational throughout."#.to_string(),

            user: "Here are {{count}} partial summaries from different parts of the video. Merge them into one cohesive summary:\n\n{{partials}}".to_string(),

            focus: r#"The viewer specifically wanted to know: "{{prompt}}". Prioritize content related to this."#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let merge_path = custom_path.join("merge.toml");
            if merge_path.exists() {
                let content = std::fs::read_to_string(&merge_path)?;
                prompts.merge = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
