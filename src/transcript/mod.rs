//! Transcript data and plumbing.
//!
//! Fragments are produced once per request (by a [`TranscriptSource`] or the
//! on-disk [`TranscriptCache`]) and are read-only for the rest of the pipeline.

mod cache;
mod matcher;
mod youtube;

pub use cache::{load_transcript_file, TranscriptCache};
pub use matcher::{find_quote, DEFAULT_MATCH_THRESHOLD};
pub use youtube::{extract_video_id, YoutubeTranscriptSource};

use crate::error::{Result, TldwError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One timestamped unit of transcribed speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    /// Spoken text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// Render this fragment as a prompt line: `[M:SS] text`.
    pub fn render_line(&self) -> String {
        let total = self.start as u64;
        format!("[{}:{:02}] {}", total / 60, total % 60, self.text)
    }
}

/// Anything that can produce the fragments of a video.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video id.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>>;
}

/// Build a single text block from fragments, one `[M:SS] text` line each.
pub fn render_transcript(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(TranscriptFragment::render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format seconds as M:SS or H:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Canonical watch URL for a video id.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Deep link into a video at a given second (fractional seconds truncated).
pub fn timestamp_url(video_url: &str, seconds: f64) -> Result<String> {
    let mut url = url::Url::parse(video_url)
        .map_err(|e| TldwError::InvalidInput(format!("Invalid video URL {}: {}", video_url, e)))?;
    url.query_pairs_mut()
        .append_pair("t", &format!("{}s", seconds.max(0.0) as u64));
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript() {
        let fragments = vec![
            TranscriptFragment::new("hello world", 0.0, 5.0),
            TranscriptFragment::new("second line", 65.0, 5.0),
        ];

        let text = render_transcript(&fragments);
        assert_eq!(text, "[0:00] hello world\n[1:05] second line");
    }

    #[test]
    fn test_render_transcript_empty() {
        assert_eq!(render_transcript(&[]), "");
    }

    #[test]
    fn test_render_line_long_video() {
        let fragment = TranscriptFragment::new("late", 4503.9, 1.0);
        assert_eq!(fragment.render_line(), "[75:03] late");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(45.0), "0:45");
        assert_eq!(format_timestamp(90.7), "1:30");
        assert_eq!(format_timestamp(3661.0), "1:01:01");
    }

    #[test]
    fn test_timestamp_url() {
        let url = timestamp_url(&watch_url("dQw4w9WgXcQ"), 90.5).unwrap();
        assert_eq!(url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=90s");

        let short = timestamp_url("https://youtu.be/dQw4w9WgXcQ", 12.0).unwrap();
        assert_eq!(short, "https://youtu.be/dQw4w9WgXcQ?t=12s");
    }

    #[test]
    fn test_timestamp_url_rejects_garbage() {
        assert!(matches!(
            timestamp_url("not a url", 1.0),
            Err(TldwError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fragment_duration_defaults() {
        let fragment: TranscriptFragment =
            serde_json::from_str(r#"{"text": "hi", "start": 1.5}"#).unwrap();
        assert_eq!(fragment.duration, 0.0);
    }
}
