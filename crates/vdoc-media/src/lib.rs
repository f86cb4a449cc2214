//! FFmpeg/FFprobe wrappers for documentary generation.
//!
//! Turns a stored video file into the ordered frame set, duration and
//! optional source audio track that the narrative pipeline consumes.

pub mod audio;
pub mod command;
pub mod error;
pub mod extract;
pub mod frames;
pub mod probe;

pub use audio::split_audio_track;
pub use command::{FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use extract::{extract_video, ExtractedVideo, ExtractorConfig};
pub use frames::extract_frames;
pub use probe::{probe_video, VideoInfo};
