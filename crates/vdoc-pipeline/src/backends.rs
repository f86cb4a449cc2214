//! Trait implementations for the real collaborators.

use std::path::Path;

use async_trait::async_trait;
use vdoc_media::{extract_video, ExtractedVideo, ExtractorConfig, MediaError};
use vdoc_models::{DocumentaryMetadata, FrameSet, NarrativeResult, NewDocumentary};
use vdoc_openai::{OpenAiClient, OpenAiError};
use vdoc_store::{GridDbClient, StoreError};

use crate::traits::{GenerationBackend, MetadataStore, VideoExtractor};

/// FFmpeg-backed extractor. Sampled frame images land in a per-run
/// scratch directory that is dropped with the extraction result.
pub struct FfmpegExtractor {
    config: ExtractorConfig,
}

impl FfmpegExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}

#[async_trait]
impl VideoExtractor for FfmpegExtractor {
    async fn extract(&self, video_path: &Path) -> Result<ExtractedVideo, MediaError> {
        let scratch = tempfile::tempdir()?;
        extract_video(video_path, scratch.path(), &self.config).await
    }
}

#[async_trait]
impl GenerationBackend for OpenAiClient {
    async fn narrative(&self, frames: &FrameSet) -> Result<NarrativeResult, OpenAiError> {
        self.generate_narrative(frames).await
    }

    async fn title(&self, narrative: &str) -> Result<String, OpenAiError> {
        self.generate_title(narrative).await
    }

    async fn speech(&self, text: &str) -> Result<Vec<u8>, OpenAiError> {
        self.synthesize_speech(text).await
    }
}

#[async_trait]
impl MetadataStore for GridDbClient {
    async fn save(&self, record: NewDocumentary) -> Result<DocumentaryMetadata, StoreError> {
        self.save_documentary(record).await
    }

    async fn get(&self, id: i64) -> Result<Option<DocumentaryMetadata>, StoreError> {
        self.get_documentary(id).await
    }

    async fn list(&self) -> Result<Vec<DocumentaryMetadata>, StoreError> {
        self.list_documentaries().await
    }
}
