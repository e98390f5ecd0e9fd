//! Structured summaries produced by the model.

mod parser;

pub use parser::parse_summary;

use crate::error::Result;
use crate::transcript::{format_timestamp, timestamp_url};
use serde::{Deserialize, Serialize};

/// A video summary: one line plus ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub one_liner: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// One topic of the video, backed by a quote from the transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub timestamp_hint: String,
    /// Start of the transcript fragment the quote was matched to.
    ///
    /// Set by quote validation, never read from model output.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub matched_start: Option<f64>,
}

impl Section {
    /// Matched start, or 0.0 while unresolved.
    pub fn start_seconds(&self) -> f64 {
        self.matched_start.unwrap_or(0.0)
    }

    /// Display timestamp for the matched start.
    pub fn timestamp(&self) -> String {
        format_timestamp(self.start_seconds())
    }

    /// Deep link into the video at the matched start.
    pub fn url(&self, video_url: &str) -> Result<String> {
        timestamp_url(video_url, self.start_seconds())
    }
}

impl Summary {
    /// Sections whose quote has not been matched yet.
    pub fn unmatched(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.matched_start.is_none())
    }

    /// True when every section carries a matched start.
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matched_start_not_read_from_model() {
        let summary: Summary = serde_json::from_str(
            r#"{"one_liner": "x", "sections": [{"title": "t", "quote": "q", "matched_start": 42.0}]}"#,
        )
        .unwrap();
        assert_eq!(summary.sections[0].matched_start, None);
        assert!(!summary.is_fully_matched());
    }

    #[test]
    fn test_unmatched_sections_serialize_without_start() {
        let section = Section {
            title: "t".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&section).unwrap();
        assert!(!json.contains("matched_start"));

        let matched = Section {
            matched_start: Some(3.0),
            ..section
        };
        assert!(serde_json::to_string(&matched).unwrap().contains("\"matched_start\":3.0"));
    }

    #[test]
    fn test_section_links() {
        let section = Section {
            matched_start: Some(3725.9),
            ..Default::default()
        };
        assert_eq!(section.timestamp(), "1:02:05");
        assert_eq!(
            section.url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=3725s"
        );
    }
}
