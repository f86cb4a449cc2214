//! FFprobe video information.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Video file information relevant to documentary generation.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Video codec
    pub codec: String,
    /// Whether the file carries an audio stream
    pub has_audio: bool,
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Probe a video file for information.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    video_info_from_probe(probe)
}

fn video_info_from_probe(probe: FfprobeOutput) -> MediaResult<VideoInfo> {
    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::invalid_video("No video stream found"))?;

    let duration = probe
        .format
        .duration
        .as_ref()
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    if duration <= 0.0 {
        return Err(MediaError::invalid_video(
            "Video reports a non-positive duration",
        ));
    }

    let has_audio = probe.streams.iter().any(|s| s.codec_type == "audio");

    Ok(VideoInfo {
        duration,
        width: video_stream.width.unwrap_or(0),
        height: video_stream.height.unwrap_or(0),
        codec: video_stream.codec_name.clone().unwrap_or_default(),
        has_audio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_fixture(json: &str) -> FfprobeOutput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_video_and_audio_streams() {
        let probe = probe_fixture(
            r#"{
                "format": {"duration": "10.04"},
                "streams": [
                    {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080},
                    {"codec_type": "audio", "codec_name": "aac"}
                ]
            }"#,
        );
        let info = video_info_from_probe(probe).unwrap();
        assert!((info.duration - 10.04).abs() < 1e-9);
        assert_eq!(info.width, 1920);
        assert_eq!(info.codec, "h264");
        assert!(info.has_audio);
    }

    #[test]
    fn test_video_only_file_has_no_audio() {
        let probe = probe_fixture(
            r#"{
                "format": {"duration": "3.0"},
                "streams": [{"codec_type": "video", "codec_name": "vp9", "width": 640, "height": 360}]
            }"#,
        );
        let info = video_info_from_probe(probe).unwrap();
        assert!(!info.has_audio);
    }

    #[test]
    fn test_missing_video_stream_is_invalid() {
        let probe = probe_fixture(
            r#"{"format": {"duration": "3.0"}, "streams": [{"codec_type": "audio"}]}"#,
        );
        assert!(matches!(
            video_info_from_probe(probe),
            Err(MediaError::InvalidVideo(_))
        ));
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let probe = probe_fixture(
            r#"{"format": {}, "streams": [{"codec_type": "video", "width": 1, "height": 1}]}"#,
        );
        assert!(matches!(
            video_info_from_probe(probe),
            Err(MediaError::InvalidVideo(_))
        ));
    }
}
