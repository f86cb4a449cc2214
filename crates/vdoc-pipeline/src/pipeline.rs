//! Pipeline orchestration.
//!
//! One run per uploaded video: Extract → Narrate → Title → Voice →
//! Persist. Stages are strictly sequential; the first failure aborts
//! the run tagged with its stage. Artifacts produced before a failure
//! are left in place (at-least-once artifact, at-most-once record).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;
use vdoc_models::{slugify, NewDocumentary};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult, SynthesisError};
use crate::traits::{GenerationBackend, MetadataStore, VideoExtractor};

/// What a completed run hands back to the HTTP boundary. The metadata
/// record has already been persisted by this point.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Stored video reference.
    pub filename: String,
    pub narrative: String,
    pub title: String,
    /// Synthesized speech artifact filename.
    pub voice: String,
}

/// The documentary generation pipeline.
///
/// Collaborators are injected so every stage can be doubled in tests.
/// A `Pipeline` is cheap to clone and safe to share across concurrent
/// runs; runs only share the store and the audio directory.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn VideoExtractor>,
    generation: Arc<dyn GenerationBackend>,
    store: Arc<dyn MetadataStore>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        extractor: Arc<dyn VideoExtractor>,
        generation: Arc<dyn GenerationBackend>,
        store: Arc<dyn MetadataStore>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            extractor,
            generation,
            store,
            config,
        }
    }

    /// Execute one full run for a stored video file.
    pub async fn run(&self, video_path: &Path) -> PipelineResult<PipelineOutput> {
        let run_id = Uuid::new_v4();
        let video_ref = video_path.to_string_lossy().to_string();
        info!(run_id = %run_id, video = %video_ref, "Pipeline run started");

        let extracted = self.extractor.extract(video_path).await.map_err(|e| {
            warn!(run_id = %run_id, stage = "extraction", error = %e, "Stage failed");
            PipelineError::Extraction(e)
        })?;
        let frames = extracted.frames;
        info!(
            run_id = %run_id,
            frame_count = frames.len(),
            duration_seconds = frames.duration_seconds,
            "Frames extracted"
        );

        let narrative = self.generation.narrative(&frames).await.map_err(|e| {
            warn!(run_id = %run_id, stage = "narrative", error = %e, "Stage failed");
            PipelineError::Narrative(e)
        })?;

        let title = self.generation.title(&narrative.text).await.map_err(|e| {
            warn!(run_id = %run_id, stage = "title", error = %e, "Stage failed");
            PipelineError::Title(e)
        })?;
        info!(run_id = %run_id, title = %title, "Title generated");

        let slug = slugify(&title);
        let slug = if slug.is_empty() {
            "untitled".to_string()
        } else {
            slug
        };
        let audio_filename = format!("{slug}.mp3");

        let audio_bytes = self
            .generation
            .speech(&narrative.text)
            .await
            .map_err(|e| {
                warn!(run_id = %run_id, stage = "speech", error = %e, "Stage failed");
                PipelineError::Synthesis(SynthesisError::Speech(e))
            })?;
        let audio_path = write_audio(&self.config.audio_dir, &audio_filename, &audio_bytes)
            .await
            .map_err(|e| {
                warn!(run_id = %run_id, stage = "speech", error = %e, "Audio write failed");
                PipelineError::Synthesis(SynthesisError::Io(e))
            })?;
        info!(run_id = %run_id, audio = %audio_path.display(), "Speech artifact written");

        let record = self
            .store
            .save(NewDocumentary {
                video: video_ref.clone(),
                audio: audio_filename.clone(),
                narrative: narrative.text.clone(),
                title: title.clone(),
            })
            .await
            .map_err(|e| {
                warn!(run_id = %run_id, stage = "persistence", error = %e, "Stage failed");
                PipelineError::Persistence(e)
            })?;
        info!(run_id = %run_id, record_id = record.id, "Pipeline run complete");

        Ok(PipelineOutput {
            filename: video_ref,
            narrative: narrative.text,
            title,
            voice: audio_filename,
        })
    }
}

/// Write audio bytes under `dir`, returning the final path.
///
/// Writes to a `.tmp` sibling first and renames into place, so the
/// final filename never names a partially written file. Existing files
/// with the same name are overwritten (last writer wins).
async fn write_audio(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let final_path = dir.join(filename);
    let tmp_path = dir.join(format!("{filename}.tmp"));

    fs::write(&tmp_path, bytes).await?;
    if let Err(e) = fs::rename(&tmp_path, &final_path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e);
    }

    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockGenerationBackend, MockMetadataStore, MockVideoExtractor};
    use tempfile::TempDir;
    use vdoc_media::{ExtractedVideo, MediaError};
    use vdoc_models::{FrameSet, NarrativeResult};
    use vdoc_openai::OpenAiError;
    use vdoc_store::StoreError;

    const NARRATIVE: &str = "A lone light drifted across five frames of dusk.";
    const TITLE: &str = "The Wandering Light";

    fn extracted(frame_count: usize, duration: f64) -> ExtractedVideo {
        ExtractedVideo {
            frames: FrameSet::new(vec!["aGk=".to_string(); frame_count], duration, None),
        }
    }

    fn working_extractor() -> MockVideoExtractor {
        let mut extractor = MockVideoExtractor::new();
        extractor
            .expect_extract()
            .returning(|_| Ok(extracted(5, 10.0)));
        extractor
    }

    fn working_generation() -> MockGenerationBackend {
        let mut generation = MockGenerationBackend::new();
        generation
            .expect_narrative()
            .returning(|_| Ok(NarrativeResult::new(NARRATIVE)));
        generation
            .expect_title()
            .returning(|_| Ok(TITLE.to_string()));
        generation
            .expect_speech()
            .returning(|_| Ok(b"mp3-bytes".to_vec()));
        generation
    }

    fn untouched_store() -> MockMetadataStore {
        let mut store = MockMetadataStore::new();
        store.expect_save().times(0);
        store
    }

    fn pipeline(
        extractor: MockVideoExtractor,
        generation: MockGenerationBackend,
        store: MockMetadataStore,
        audio_dir: PathBuf,
    ) -> Pipeline {
        Pipeline::new(
            Arc::new(extractor),
            Arc::new(generation),
            Arc::new(store),
            PipelineConfig { audio_dir },
        )
    }

    #[tokio::test]
    async fn successful_run_persists_one_matching_record() {
        let audio_dir = TempDir::new().unwrap();

        let mut store = MockMetadataStore::new();
        store
            .expect_save()
            .times(1)
            .withf(|record| {
                record.narrative == NARRATIVE
                    && record.title == TITLE
                    && record.audio == "the-wandering-light.mp3"
                    && record.video.ends_with("clip.mp4")
            })
            .returning(|record| Ok(record.with_id(99)));

        let pipeline = pipeline(
            working_extractor(),
            working_generation(),
            store,
            audio_dir.path().to_path_buf(),
        );

        let output = pipeline.run(Path::new("uploads/clip.mp4")).await.unwrap();
        assert_eq!(output.filename, "uploads/clip.mp4");
        assert_eq!(output.narrative, NARRATIVE);
        assert_eq!(output.title, TITLE);
        assert_eq!(output.voice, "the-wandering-light.mp3");

        let audio = audio_dir.path().join("the-wandering-light.mp3");
        assert_eq!(std::fs::read(&audio).unwrap(), b"mp3-bytes");
        assert!(!audio_dir.path().join("the-wandering-light.mp3.tmp").exists());
    }

    #[tokio::test]
    async fn extraction_failure_leaves_no_record() {
        let audio_dir = TempDir::new().unwrap();
        let mut extractor = MockVideoExtractor::new();
        extractor
            .expect_extract()
            .returning(|_| Err(MediaError::invalid_video("not decodable")));

        let pipeline = pipeline(
            extractor,
            MockGenerationBackend::new(),
            untouched_store(),
            audio_dir.path().to_path_buf(),
        );

        let err = pipeline.run(Path::new("bad.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Extraction);
    }

    #[tokio::test]
    async fn truncated_narrative_fails_the_run() {
        let audio_dir = TempDir::new().unwrap();
        let mut generation = MockGenerationBackend::new();
        generation.expect_narrative().returning(|_| {
            Err(OpenAiError::IncompleteGeneration {
                finish_reason: "length".to_string(),
            })
        });

        let pipeline = pipeline(
            working_extractor(),
            generation,
            untouched_store(),
            audio_dir.path().to_path_buf(),
        );

        let err = pipeline.run(Path::new("clip.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Narrative);
    }

    #[tokio::test]
    async fn empty_title_fails_the_run() {
        let audio_dir = TempDir::new().unwrap();
        let mut generation = MockGenerationBackend::new();
        generation
            .expect_narrative()
            .returning(|_| Ok(NarrativeResult::new(NARRATIVE)));
        generation
            .expect_title()
            .returning(|_| Err(OpenAiError::EmptyResponse));

        let pipeline = pipeline(
            working_extractor(),
            generation,
            untouched_store(),
            audio_dir.path().to_path_buf(),
        );

        let err = pipeline.run(Path::new("clip.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Title);
    }

    #[tokio::test]
    async fn speech_failure_fails_the_run() {
        let audio_dir = TempDir::new().unwrap();
        let mut generation = MockGenerationBackend::new();
        generation
            .expect_narrative()
            .returning(|_| Ok(NarrativeResult::new(NARRATIVE)));
        generation
            .expect_title()
            .returning(|_| Ok(TITLE.to_string()));
        generation.expect_speech().returning(|_| {
            Err(OpenAiError::Api {
                status: 500,
                body: "tts down".to_string(),
            })
        });

        let pipeline = pipeline(
            working_extractor(),
            generation,
            untouched_store(),
            audio_dir.path().to_path_buf(),
        );

        let err = pipeline.run(Path::new("clip.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Speech);
        assert!(!audio_dir.path().join("the-wandering-light.mp3").exists());
    }

    #[tokio::test]
    async fn unwritable_audio_dir_fails_the_speech_stage() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, b"a file, not a directory").unwrap();

        let pipeline = pipeline(
            working_extractor(),
            working_generation(),
            untouched_store(),
            blocked,
        );

        let err = pipeline.run(Path::new("clip.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Speech);
    }

    #[tokio::test]
    async fn persistence_failure_fails_the_run_but_keeps_the_audio() {
        let audio_dir = TempDir::new().unwrap();
        let mut store = MockMetadataStore::new();
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(StoreError::unavailable("store down")));

        let pipeline = pipeline(
            working_extractor(),
            working_generation(),
            store,
            audio_dir.path().to_path_buf(),
        );

        let err = pipeline.run(Path::new("clip.mp4")).await.unwrap_err();
        assert_eq!(err.stage(), crate::Stage::Persistence);
        // Accepted partial state: the artifact stays, the record does not.
        assert!(audio_dir.path().join("the-wandering-light.mp3").exists());
    }

    #[tokio::test]
    async fn concurrent_runs_stay_independent() {
        let audio_dir = TempDir::new().unwrap();

        let runs: Vec<(&'static str, i64)> = vec![("First Story", 1), ("Second Story", 2)];
        let mut pipelines = Vec::new();
        for (title, id) in runs {
            let mut generation = MockGenerationBackend::new();
            generation
                .expect_narrative()
                .returning(|_| Ok(NarrativeResult::new(NARRATIVE)));
            generation
                .expect_title()
                .returning(move |_| Ok(title.to_string()));
            generation
                .expect_speech()
                .returning(|_| Ok(b"mp3".to_vec()));

            let mut store = MockMetadataStore::new();
            store
                .expect_save()
                .times(1)
                .returning(move |record| Ok(record.with_id(id)));

            pipelines.push(pipeline(
                working_extractor(),
                generation,
                store,
                audio_dir.path().to_path_buf(),
            ));
        }

        let second = pipelines.pop().unwrap();
        let first = pipelines.pop().unwrap();
        let (a, b) = tokio::join!(
            first.run(Path::new("uploads/a.mp4")),
            second.run(Path::new("uploads/b.mp4"))
        );

        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a.voice, "first-story.mp3");
        assert_eq!(b.voice, "second-story.mp3");
        assert!(audio_dir.path().join("first-story.mp3").exists());
        assert!(audio_dir.path().join("second-story.mp3").exists());
    }

    #[tokio::test]
    async fn write_audio_overwrites_existing_artifact() {
        let dir = TempDir::new().unwrap();
        write_audio(dir.path(), "take.mp3", b"old").await.unwrap();
        write_audio(dir.path(), "take.mp3", b"new").await.unwrap();
        assert_eq!(std::fs::read(dir.path().join("take.mp3")).unwrap(), b"new");
    }
}
