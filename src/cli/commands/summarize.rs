//! Summarize command implementation.

use super::run_setup;
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::{Credentials, ModelConfig, Settings};
use crate::gateway::{ModelGateway, ProviderGateway};
use crate::orchestrator::Summarizer;
use crate::transcript::{
    extract_video_id, load_transcript_file, watch_url, TranscriptCache, TranscriptFragment,
    TranscriptSource, YoutubeTranscriptSource,
};
use anyhow::{anyhow, bail, Result};
use std::path::Path;

/// Options for one summarize run.
#[derive(Debug, Default)]
pub struct SummarizeOptions<'a> {
    pub gimme: Option<&'a str>,
    pub model: Option<&'a str>,
    pub json: bool,
    pub transcript: Option<&'a str>,
    pub force: bool,
}

/// Run the summarize command.
pub async fn run_summarize(
    url: &str,
    options: SummarizeOptions<'_>,
    mut settings: Settings,
    config_path: &Path,
) -> Result<()> {
    let video_id = extract_video_id(url)?;
    let video_url = watch_url(&video_id);

    let credentials = Credentials::from_env();
    let gateway = ProviderGateway::new(credentials.clone(), &settings.llm);
    let model = resolve_model(options.model, &mut settings, config_path, &gateway).await?;

    // Pre-flight checks
    if let Err(e) = preflight::check_provider(&model, &credentials) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tldw doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let fragments = load_fragments(&video_id, &options, &settings).await?;
    if fragments.is_empty() {
        bail!("Transcript for {} is empty", video_id);
    }
    if !options.json {
        Output::success(&format!("Got {} transcript lines", fragments.len()));
    }

    let summarizer = Summarizer::new(&settings, credentials)?;

    let focus_msg = options
        .gimme
        .map(|g| format!(" focused on: \"{}\"", g))
        .unwrap_or_default();
    let spinner = Output::spinner(&format!(
        "thinking real hard about this video{}...",
        focus_msg
    ));

    let summary = match summarizer.summarize(&fragments, options.gimme, &model).await {
        Ok(summary) => {
            spinner.finish_and_clear();
            summary
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("LLM error: {}", e));
            return Err(e.into());
        }
    };

    if options.json {
        Output::summary_json(&summary, &video_url)?;
    } else {
        Output::summary(&summary, &video_url)?;
    }

    Ok(())
}

/// Model from `--model`, else the selected one, else interactive setup.
async fn resolve_model(
    requested: Option<&str>,
    settings: &mut Settings,
    config_path: &Path,
    gateway: &dyn ModelGateway,
) -> Result<ModelConfig> {
    if let Some(id) = requested {
        return settings
            .resolve_model(id)
            .ok_or_else(|| anyhow!("Unknown model: {}. Run 'tldw models list'.", id));
    }

    match settings.selected_model() {
        Some(model) => Ok(model),
        None => run_setup(settings, config_path, gateway).await,
    }
}

/// Fragments from `--transcript`, the cache, or a fresh fetch.
async fn load_fragments(
    video_id: &str,
    options: &SummarizeOptions<'_>,
    settings: &Settings,
) -> Result<Vec<TranscriptFragment>> {
    if let Some(path) = options.transcript {
        let path = Settings::expand_path(path);
        return Ok(load_transcript_file(&path)?);
    }

    let cache = TranscriptCache::new(settings.cache_dir());
    if !options.force {
        if let Some(fragments) = cache.load(video_id)? {
            tracing::info!("Using cached transcript for {}", video_id);
            return Ok(fragments);
        }
    }

    if let Err(e) = preflight::check_transcript_fetch() {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let source = YoutubeTranscriptSource::new(settings.transcript.languages.clone());
    let spinner = Output::spinner("grabbing the transcript...");
    let fragments = match source.fetch(video_id).await {
        Ok(fragments) => {
            spinner.finish_and_clear();
            fragments
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Couldn't get transcript: {}", e));
            return Err(e.into());
        }
    };

    cache.save(video_id, &fragments)?;
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_gateway() -> ProviderGateway {
        ProviderGateway::new(Credentials::default(), &Settings::default().llm)
    }

    #[tokio::test]
    async fn test_unknown_requested_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        let config_path = dir.path().join("c.toml");
        let gateway = offline_gateway();
        let err = resolve_model(Some("nope/nothing"), &mut settings, &config_path, &gateway)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope/nothing"));
    }

    #[tokio::test]
    async fn test_requested_model_wins_over_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.set_selected_model("openai/gpt-5");
        let config_path = dir.path().join("c.toml");
        let model = resolve_model(
            Some("google/gemini-2.5-pro"),
            &mut settings,
            &config_path,
            &offline_gateway(),
        )
        .await
        .unwrap();
        assert_eq!(model.id, "google/gemini-2.5-pro");
    }

    #[tokio::test]
    async fn test_transcript_file_skips_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"[{"text": "hi there", "start": 1.5}]"#).unwrap();

        let path_str = path.to_string_lossy().into_owned();
        let options = SummarizeOptions {
            transcript: Some(&path_str),
            ..Default::default()
        };
        let fragments = load_fragments("dQw4w9WgXcQ", &options, &Settings::default())
            .await
            .unwrap();
        assert_eq!(fragments, vec![TranscriptFragment::new("hi there", 1.5, 0.0)]);
    }

    #[tokio::test]
    async fn test_cached_transcript_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.cache_dir = dir.path().to_string_lossy().into_owned();

        let cached = vec![TranscriptFragment::new("from cache", 0.0, 1.0)];
        TranscriptCache::new(dir.path()).save("dQw4w9WgXcQ", &cached).unwrap();

        let fragments = load_fragments("dQw4w9WgXcQ", &SummarizeOptions::default(), &settings)
            .await
            .unwrap();
        assert_eq!(fragments, cached);
    }
}
