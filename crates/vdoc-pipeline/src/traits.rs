//! Injected collaborator seams.
//!
//! Every external collaborator the pipeline touches sits behind a
//! trait so a run can be exercised with test doubles end to end.

use std::path::Path;

use async_trait::async_trait;
use vdoc_media::{ExtractedVideo, MediaError};
use vdoc_models::{DocumentaryMetadata, FrameSet, NarrativeResult, NewDocumentary};
use vdoc_openai::OpenAiError;
use vdoc_store::StoreError;

/// Turns a stored video file into ordered frames, duration, and the
/// optional source audio track.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    async fn extract(&self, video_path: &Path) -> Result<ExtractedVideo, MediaError>;
}

/// Generation calls: multimodal narrative, title, speech.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn narrative(&self, frames: &FrameSet) -> Result<NarrativeResult, OpenAiError>;
    async fn title(&self, narrative: &str) -> Result<String, OpenAiError>;
    async fn speech(&self, text: &str) -> Result<Vec<u8>, OpenAiError>;
}

/// Keyed metadata store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn save(&self, record: NewDocumentary) -> Result<DocumentaryMetadata, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<DocumentaryMetadata>, StoreError>;
    async fn list(&self) -> Result<Vec<DocumentaryMetadata>, StoreError>;
}
