//! Documentary generation pipeline.
//!
//! Sequences the five stages that turn a stored video into a persisted
//! documentary record: frame/duration extraction, narrative
//! generation, title generation, speech synthesis, and metadata
//! persistence. Collaborators are injected behind traits; the real
//! implementations wrap FFmpeg, the OpenAI API, and GridDB.

pub mod backends;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod traits;

pub use backends::FfmpegExtractor;
pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult, Stage, SynthesisError};
pub use pipeline::{Pipeline, PipelineOutput};
pub use traits::{GenerationBackend, MetadataStore, VideoExtractor};
