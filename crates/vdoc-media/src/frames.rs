//! Still-frame sampling.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::fs;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

const FRAME_PREFIX: &str = "frame_";

/// Sample still frames from a video into `scratch_dir` and return them
/// base64-encoded, in temporal order.
///
/// Uses the `fps` filter, so a 10-second video sampled at 0.5 fps
/// yields 5 frames. The zero-padded output pattern makes lexicographic
/// filename order equal temporal order.
pub async fn extract_frames(
    video_path: impl AsRef<Path>,
    scratch_dir: impl AsRef<Path>,
    fps: f64,
) -> MediaResult<Vec<String>> {
    let video_path = video_path.as_ref();
    let scratch_dir = scratch_dir.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }
    fs::create_dir_all(scratch_dir).await?;

    let pattern = scratch_dir.join(format!("{FRAME_PREFIX}%05d.png"));
    let cmd = FfmpegCommand::new(video_path, &pattern)
        .video_filter(format!("fps={fps}"))
        .no_audio();

    FfmpegRunner::new().run(&cmd).await?;

    let frames = collect_frames(scratch_dir).await?;
    debug!(
        "Extracted {} frames from {}",
        frames.len(),
        video_path.display()
    );
    Ok(frames)
}

/// Read sampled frame files from `dir` in filename order and encode
/// them as base64.
async fn collect_frames(dir: &Path) -> MediaResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(FRAME_PREFIX) && name.ends_with(".png") {
            names.push(name);
        }
    }
    // Zero-padded frame numbers: lexicographic order is temporal order.
    names.sort();

    if names.is_empty() {
        return Err(MediaError::NoFrames);
    }

    let mut frames = Vec::with_capacity(names.len());
    for name in names {
        let bytes = fs::read(dir.join(name)).await?;
        frames.push(BASE64.encode(bytes));
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collect_frames_in_temporal_order() {
        let dir = TempDir::new().unwrap();
        // Written out of order on purpose.
        for (name, contents) in [
            ("frame_00002.png", b"second".as_slice()),
            ("frame_00001.png", b"first".as_slice()),
            ("frame_00003.png", b"third".as_slice()),
        ] {
            fs::write(dir.path().join(name), contents).await.unwrap();
        }

        let frames = collect_frames(dir.path()).await.unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], BASE64.encode(b"first"));
        assert_eq!(frames[1], BASE64.encode(b"second"));
        assert_eq!(frames[2], BASE64.encode(b"third"));
    }

    #[tokio::test]
    async fn test_collect_frames_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("frame_00001.png"), b"frame")
            .await
            .unwrap();
        fs::write(dir.path().join("audio.mp3"), b"noise")
            .await
            .unwrap();

        let frames = collect_frames(dir.path()).await.unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_scratch_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            collect_frames(dir.path()).await,
            Err(MediaError::NoFrames)
        ));
    }
}
