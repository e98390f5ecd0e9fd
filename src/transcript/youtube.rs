//! YouTube transcript source.
//!
//! Subtitles are fetched with `yt-dlp` in its `json3` format and decoded into
//! fragments.

use super::{watch_url, TranscriptFragment, TranscriptSource};
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::{debug, info, instrument};

static VIDEO_ID_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:v=|/v/|youtu\.be/)([a-zA-Z0-9_-]{11})").expect("Invalid regex"),
        Regex::new(r"embed/([a-zA-Z0-9_-]{11})").expect("Invalid regex"),
        Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("Invalid regex"),
    ]
});

/// Extract the video id from a YouTube URL or a bare 11-character id.
pub fn extract_video_id(input: &str) -> Result<String> {
    let input = input.trim();
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(input).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            TldwError::InvalidInput(format!("Could not extract video ID from: {}", input))
        })
}

/// Fetches transcripts through `yt-dlp` subtitles.
pub struct YoutubeTranscriptSource {
    languages: Vec<String>,
}

impl YoutubeTranscriptSource {
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }

    /// `--sub-langs` argument: each configured language plus its regional variants.
    fn sub_langs(&self) -> String {
        self.languages
            .iter()
            .map(|l| format!("{}.*", l))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Pick the downloaded subtitle file, preferring the configured language order.
    fn find_subtitle_file(&self, dir: &Path, video_id: &str) -> Result<PathBuf> {
        for lang in &self.languages {
            let candidate = dir.join(format!("{}.{}.json3", video_id, lang));
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json3"))
            .collect();
        found.sort();

        found.into_iter().next().ok_or_else(|| {
            TldwError::Transcript(format!(
                "No {} subtitles available for {}",
                self.languages.join("/"),
                video_id
            ))
        })
    }
}

impl Default for YoutubeTranscriptSource {
    fn default() -> Self {
        Self::new(vec!["en".to_string()])
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>> {
        let temp_dir = tempfile::tempdir()?;
        let template = temp_dir.path().join("%(id)s.%(ext)s");

        info!("Downloading subtitles for {}", video_id);

        let result = Command::new("yt-dlp")
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs")
            .arg(self.sub_langs())
            .arg("--sub-format")
            .arg("json3")
            .arg("--output")
            .arg(&template)
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(watch_url(video_id))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TldwError::ToolNotFound("yt-dlp".into()));
            }
            Err(e) => {
                return Err(TldwError::Transcript(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TldwError::Transcript(format!("yt-dlp failed: {stderr}")));
        }

        let path = self.find_subtitle_file(temp_dir.path(), video_id)?;
        debug!("Parsing subtitles from {}", path.display());

        let content = tokio::fs::read_to_string(&path).await?;
        let fragments = parse_json3(&content)?;

        if fragments.is_empty() {
            return Err(TldwError::Transcript(format!(
                "Subtitles for {} contain no text",
                video_id
            )));
        }

        Ok(fragments)
    }
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Decode a `json3` subtitle document into fragments.
fn parse_json3(content: &str) -> Result<Vec<TranscriptFragment>> {
    let doc: Json3 = serde_json::from_str(content)
        .map_err(|e| TldwError::Transcript(format!("Invalid subtitle file: {}", e)))?;

    let fragments = doc
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(TranscriptFragment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(fragments)
}
