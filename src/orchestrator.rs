//! Summarization pipeline.
//!
//! Coordinates prompting, chunking for long transcripts, merging of partial
//! summaries and validation of every quote against the transcript.

use crate::chunking::{ContextBudget, TranscriptChunker};
use crate::config::{Credentials, LlmSettings, ModelConfig, Prompts, Settings};
use crate::error::Result;
use crate::gateway::{ModelGateway, ProviderGateway};
use crate::prompt::PromptBuilder;
use crate::summary::{parse_summary, Summary};
use crate::transcript::{find_quote, render_transcript, TranscriptFragment};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Threshold for quotes to count as verified.
pub const VALIDATION_THRESHOLD: f64 = 0.4;

/// Looser threshold used to place quotes that never verified.
pub const FALLBACK_THRESHOLD: f64 = 0.2;

/// Turns transcripts into validated summaries.
pub struct Summarizer {
    gateway: Arc<dyn ModelGateway>,
    prompts: Prompts,
    llm: LlmSettings,
}

impl Summarizer {
    /// Create a summarizer from settings and provider credentials.
    pub fn new(settings: &Settings, credentials: Credentials) -> Result<Self> {
        // Load prompts (with optional custom directory and variables)
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let gateway: Arc<dyn ModelGateway> =
            Arc::new(ProviderGateway::new(credentials, &settings.llm));

        Ok(Self::with_components(gateway, prompts, settings.llm.clone()))
    }

    /// Create a summarizer with custom components.
    pub fn with_components(
        gateway: Arc<dyn ModelGateway>,
        prompts: Prompts,
        llm: LlmSettings,
    ) -> Self {
        Self {
            gateway,
            prompts,
            llm,
        }
    }

    /// Summarize a transcript, optionally focused on a viewer question.
    ///
    /// Every section of the result carries a matched start time. Quotes that
    /// fail validation trigger up to `max_retries` re-prompts.
    #[instrument(skip(self, fragments, model), fields(model = %model.id, fragments = fragments.len()))]
    pub async fn summarize(
        &self,
        fragments: &[TranscriptFragment],
        focus: Option<&str>,
        model: &ModelConfig,
    ) -> Result<Summary> {
        let builder = PromptBuilder::new(&self.prompts);
        let max_chars = ContextBudget::for_model(&model.model, &self.llm).max_transcript_chars();
        let transcript_text = render_transcript(fragments);

        let mut summary = if transcript_text.chars().count() > max_chars {
            self.summarize_chunked(&builder, fragments, focus, model, max_chars)
                .await?
        } else {
            let prompt = builder.render(&transcript_text, focus);
            let raw = self
                .gateway
                .complete(&builder.summary_system(), &prompt, model)
                .await?;
            parse_summary(&raw)?
        };

        for attempt in 0..=self.llm.max_retries {
            let bad_quotes = validate_quotes(&mut summary, fragments);
            if bad_quotes.is_empty() {
                debug!("All quotes verified");
                break;
            }
            if attempt == self.llm.max_retries {
                warn!("{} quote(s) still unverified after {} retries", bad_quotes.len(), attempt);
                break;
            }

            info!("Retrying for {} unverified quote(s), attempt {}", bad_quotes.len(), attempt + 1);
            let truncated: String = transcript_text.chars().take(max_chars).collect();
            let prompt = format!(
                "{}\n\n{}",
                builder.render(&truncated, focus),
                builder.retry(&bad_quotes)
            );
            let raw = self
                .gateway
                .complete(&builder.summary_system(), &prompt, model)
                .await?;
            summary = parse_summary(&raw)?;
        }

        attach_fallback_starts(&mut summary, fragments);
        Ok(summary)
    }

    /// Summarize each chunk separately, then merge the partial summaries.
    async fn summarize_chunked(
        &self,
        builder: &PromptBuilder<'_>,
        fragments: &[TranscriptFragment],
        focus: Option<&str>,
        model: &ModelConfig,
        max_chars: usize,
    ) -> Result<Summary> {
        let chunks = TranscriptChunker::new(max_chars).split(fragments);
        info!("Transcript exceeds context budget, summarizing {} chunks", chunks.len());

        let system = builder.summary_system();
        let mut partials = Vec::with_capacity(chunks.len());
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Summarizing chunk {}/{}", idx + 1, chunks.len());
            let prompt = builder.render(&render_transcript(chunk), focus);
            let raw = self.gateway.complete(&system, &prompt, model).await?;
            partials.push(parse_summary(&raw)?);
        }

        let merge_prompt = builder.merge(&partials, focus)?;
        let raw = self
            .gateway
            .complete(&builder.merge_system(), &merge_prompt, model)
            .await?;
        parse_summary(&raw)
    }
}

/// Match every quote at the validation threshold.
///
/// Sets the start of matched sections and returns the quotes that failed.
fn validate_quotes(summary: &mut Summary, fragments: &[TranscriptFragment]) -> Vec<String> {
    let mut bad_quotes = Vec::new();
    for section in &mut summary.sections {
        match find_quote(&section.quote, fragments, VALIDATION_THRESHOLD) {
            Some(fragment) => section.matched_start = Some(fragment.start),
            None => bad_quotes.push(section.quote.clone()),
        }
    }
    bad_quotes
}

/// Resolve remaining sections at the fallback threshold, else to 0.0.
fn attach_fallback_starts(summary: &mut Summary, fragments: &[TranscriptFragment]) {
    for section in summary.sections.iter_mut().filter(|s| s.matched_start.is_none()) {
        let start = find_quote(&section.quote, fragments, FALLBACK_THRESHOLD)
            .map(|f| f.start)
            .unwrap_or(0.0);
        section.matched_start = Some(start);
    }
}
