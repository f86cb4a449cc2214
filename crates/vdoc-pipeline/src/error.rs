//! Pipeline error types.

use thiserror::Error;
use vdoc_media::MediaError;
use vdoc_openai::OpenAiError;
use vdoc_store::StoreError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline stages, in execution order. Carried in errors and logs so
/// a failed run names where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Narrative,
    Title,
    Speech,
    Persistence,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Extraction => "extraction",
            Stage::Narrative => "narrative",
            Stage::Title => "title",
            Stage::Speech => "speech",
            Stage::Persistence => "persistence",
        };
        f.write_str(name)
    }
}

/// A stage failure that aborted a pipeline run. Every variant is fatal
/// for its run; there is no in-core retry or partial continuation.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] MediaError),

    #[error("narrative generation failed: {0}")]
    Narrative(#[source] OpenAiError),

    #[error("title generation failed: {0}")]
    Title(#[source] OpenAiError),

    #[error("speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("metadata persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl PipelineError {
    /// The stage this run failed in.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extraction,
            PipelineError::Narrative(_) => Stage::Narrative,
            PipelineError::Title(_) => Stage::Title,
            PipelineError::Synthesis(_) => Stage::Speech,
            PipelineError::Persistence(_) => Stage::Persistence,
        }
    }
}

/// Speech synthesis failures: the generation call itself or writing
/// the audio artifact.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("speech generation failed: {0}")]
    Speech(#[source] OpenAiError),

    #[error("audio file write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_their_stage() {
        let err = PipelineError::Narrative(OpenAiError::EmptyResponse);
        assert_eq!(err.stage(), Stage::Narrative);
        assert_eq!(err.stage().to_string(), "narrative");

        let err = PipelineError::Synthesis(SynthesisError::Speech(OpenAiError::EmptyResponse));
        assert_eq!(err.stage(), Stage::Speech);
    }
}
