//! On-disk transcript cache.

use super::TranscriptFragment;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores fetched transcripts as JSON files keyed by video id.
pub struct TranscriptCache {
    dir: PathBuf,
}

impl TranscriptCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the cache file for a video.
    pub fn path_for(&self, video_id: &str) -> PathBuf {
        self.dir.join(format!("{}_transcript.json", video_id))
    }

    /// Save fragments for a video, returning the file path.
    pub fn save(&self, video_id: &str, fragments: &[TranscriptFragment]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(video_id);
        std::fs::write(&path, serde_json::to_string_pretty(fragments)?)?;
        debug!("Saved {} fragments to {}", fragments.len(), path.display());
        Ok(path)
    }

    /// Load cached fragments for a video, if present.
    pub fn load(&self, video_id: &str) -> Result<Option<Vec<TranscriptFragment>>> {
        let path = self.path_for(video_id);
        if !path.exists() {
            return Ok(None);
        }
        load_transcript_file(&path).map(Some)
    }
}

/// Read a fragment list from a JSON file.
pub fn load_transcript_file(path: &Path) -> Result<Vec<TranscriptFragment>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
