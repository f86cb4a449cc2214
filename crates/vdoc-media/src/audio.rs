//! Source audio track splitting.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Split the audio track of `video_path` into an mp3 at `output_path`.
///
/// Callers should only invoke this when the probe reported an audio
/// stream; a silent video has nothing to split.
pub async fn split_audio_track(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(video_path, output_path)
        .no_video()
        .audio_codec("libmp3lame");

    FfmpegRunner::new().run(&cmd).await
}
