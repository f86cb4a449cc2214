//! Application state.

use std::sync::Arc;

use vdoc_media::ExtractorConfig;
use vdoc_openai::OpenAiClient;
use vdoc_pipeline::{FfmpegExtractor, GenerationBackend, MetadataStore, Pipeline, PipelineConfig};
use vdoc_store::GridDbClient;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<Pipeline>,
    pub generation: Arc<OpenAiClient>,
    pub store: Arc<GridDbClient>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Clients are constructed here and injected into the pipeline, so
    /// there is a single place wiring collaborators together.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let generation = Arc::new(OpenAiClient::from_env()?);
        let store = Arc::new(GridDbClient::from_env()?);
        store.ensure_container().await?;

        let extractor = Arc::new(FfmpegExtractor::new(ExtractorConfig::from_env()));

        let pipeline = Pipeline::new(
            extractor,
            Arc::clone(&generation) as Arc<dyn GenerationBackend>,
            Arc::clone(&store) as Arc<dyn MetadataStore>,
            PipelineConfig {
                audio_dir: config.audio_dir.clone(),
            },
        );

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            generation,
            store,
        })
    }
}
