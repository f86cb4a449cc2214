//! Video extraction: probe, frame sampling, audio split.

use std::path::Path;

use tracing::info;
use vdoc_models::FrameSet;

use crate::audio::split_audio_track;
use crate::error::MediaResult;
use crate::frames::extract_frames;
use crate::probe::probe_video;

/// Extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Frame sampling rate passed to the `fps` filter.
    pub frame_fps: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { frame_fps: 0.5 }
    }
}

impl ExtractorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            frame_fps: std::env::var("EXTRACT_FRAME_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.5),
        }
    }
}

/// Everything the extractor produces for one video.
#[derive(Debug, Clone)]
pub struct ExtractedVideo {
    /// Base64 PNG frames in temporal order plus the probed duration.
    pub frames: FrameSet,
}

/// Extract ordered frames, duration, and the optional audio track from
/// a stored video file.
///
/// `scratch_dir` receives the sampled frame images and is safe to
/// delete afterwards. When the source has an audio stream, the split
/// mp3 is written next to the video as `<stem>.mp3` and referenced in
/// the returned `FrameSet`.
pub async fn extract_video(
    video_path: impl AsRef<Path>,
    scratch_dir: impl AsRef<Path>,
    config: &ExtractorConfig,
) -> MediaResult<ExtractedVideo> {
    let video_path = video_path.as_ref();

    let info = probe_video(video_path).await?;
    let frames = extract_frames(video_path, scratch_dir, config.frame_fps).await?;

    let audio_track = if info.has_audio {
        let output = video_path.with_extension("mp3");
        split_audio_track(video_path, &output).await?;
        output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    } else {
        None
    };

    info!(
        video = %video_path.display(),
        duration_seconds = info.duration,
        frame_count = frames.len(),
        audio_track = audio_track.as_deref().unwrap_or("none"),
        "Video extracted"
    );

    Ok(ExtractedVideo {
        frames: FrameSet::new(frames, info.duration, audio_track),
    })
}
