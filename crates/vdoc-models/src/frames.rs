//! Frame extraction output and narrative text.

use serde::{Deserialize, Serialize};

/// Ordered still frames sampled from one video, plus its duration.
///
/// Frame order equals temporal order in the source video. Built once
/// per upload by the extractor and consumed once by narrative
/// generation; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSet {
    /// Base64-encoded PNG frames in temporal order.
    pub frames: Vec<String>,
    /// Source video duration in seconds (positive).
    pub duration_seconds: f64,
    /// Filename of the audio track split off during extraction, if the
    /// source had one. Distinct from the synthesized speech artifact.
    pub audio_track: Option<String>,
}

impl FrameSet {
    pub fn new(frames: Vec<String>, duration_seconds: f64, audio_track: Option<String>) -> Self {
        Self {
            frames,
            duration_seconds,
            audio_track,
        }
    }

    /// Number of sampled frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Narrative text produced by a generation call that completed with a
/// normal stop condition. Truncated or filtered output never becomes a
/// `NarrativeResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeResult {
    pub text: String,
}

impl NarrativeResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_set_preserves_order() {
        let frames = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let set = FrameSet::new(frames.clone(), 10.0, None);
        assert_eq!(set.frames, frames);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
    }

    #[test]
    fn frame_set_roundtrips_through_json() {
        let set = FrameSet::new(vec!["aGVsbG8=".to_string()], 2.5, Some("clip.mp3".to_string()));
        let json = serde_json::to_string(&set).unwrap();
        let back: FrameSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames, set.frames);
        assert_eq!(back.audio_track.as_deref(), Some("clip.mp3"));
    }
}
