//! Pipeline configuration.

use std::path::PathBuf;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory synthesized audio artifacts are written to.
    pub audio_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audio"),
        }
    }
}
