//! Persisted documentary metadata.

use serde::{Deserialize, Serialize};

/// One stored record per completed pipeline run. Immutable once
/// written; there is no update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentaryMetadata {
    /// Random numeric identifier assigned at persistence time.
    pub id: i64,
    /// Stored video reference (upload filename).
    pub video: String,
    /// Synthesized speech artifact filename.
    pub audio: String,
    /// Generated narrative text.
    pub narrative: String,
    /// Generated title.
    pub title: String,
}

/// Fields of a record before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocumentary {
    pub video: String,
    pub audio: String,
    pub narrative: String,
    pub title: String,
}

impl NewDocumentary {
    /// Attach an assigned id, coercing nothing: all fields are already
    /// text by construction.
    pub fn with_id(self, id: i64) -> DocumentaryMetadata {
        DocumentaryMetadata {
            id,
            video: self.video,
            audio: self.audio,
            narrative: self.narrative,
            title: self.title,
        }
    }
}
