//! OpenAI REST client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use vdoc_models::{FrameSet, NarrativeResult};

use crate::error::{OpenAiError, OpenAiResult};
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, ResponseFormat, SpeechRequest,
};

const STORYTELLER_PERSONA: &str = "You are a professional storyteller.";
const TITLE_PERSONA: &str = "You are a professional title generator.";

/// OpenAI client configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key
    pub api_key: String,
    /// API base URL (overridable for testing)
    pub base_url: String,
    /// Multimodal narrative model
    pub narrative_model: String,
    /// Title model
    pub title_model: String,
    /// Text-to-speech model
    pub speech_model: String,
    /// Text-to-speech voice
    pub voice: String,
    /// Request timeout
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> OpenAiResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAiError::config_error("OPENAI_API_KEY not set"))?;
        if api_key.is_empty() {
            return Err(OpenAiError::config_error("OPENAI_API_KEY cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            narrative_model: std::env::var("OPENAI_NARRATIVE_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            title_model: std::env::var("OPENAI_TITLE_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            speech_model: std::env::var("OPENAI_SPEECH_MODEL")
                .unwrap_or_else(|_| "tts-1".to_string()),
            voice: std::env::var("OPENAI_SPEECH_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        })
    }
}

/// OpenAI REST API client.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(config: OpenAiConfig) -> OpenAiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OpenAiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> OpenAiResult<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    /// Generate a narrative from ordered video frames.
    ///
    /// Builds one multimodal prompt: the instruction names the probed
    /// duration and directs the model to fit a story to it, followed by
    /// the frames in temporal order as low-detail image parts. Sampling
    /// favors variability (temperature 1) with a ceiling wide enough
    /// for a multi-paragraph story.
    pub async fn generate_narrative(&self, frames: &FrameSet) -> OpenAiResult<NarrativeResult> {
        let instruction = format!(
            "The original video, from which these frames were sampled, is {:.1} seconds long. \
             Create a story based on these frames that fits that duration. \
             BE CREATIVE. DIRECT ANSWER ONLY.",
            frames.duration_seconds
        );

        let mut parts = Vec::with_capacity(frames.len() + 1);
        parts.push(ContentPart::text(instruction));
        for frame in &frames.frames {
            parts.push(ContentPart::low_detail_png(frame));
        }

        let request = ChatRequest {
            model: self.config.narrative_model.clone(),
            messages: vec![
                ChatMessage::system(STORYTELLER_PERSONA),
                ChatMessage::user_parts(parts),
            ],
            temperature: 1.0,
            max_tokens: 4095,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            response_format: ResponseFormat::text(),
        };

        debug!(
            frame_count = frames.len(),
            duration_seconds = frames.duration_seconds,
            "Requesting narrative"
        );
        let text = self.chat(&request).await?;
        info!(narrative_chars = text.len(), "Narrative generated");
        Ok(NarrativeResult::new(text))
    }

    /// Generate a narrative from a plain text prompt (no frames).
    pub async fn generate_narrative_text(&self, prompt: &str) -> OpenAiResult<String> {
        let request = ChatRequest {
            model: self.config.narrative_model.clone(),
            messages: vec![
                ChatMessage::system(STORYTELLER_PERSONA),
                ChatMessage::user(format!(
                    "Direct answer only. Create a story based on the following: \n{prompt}"
                )),
            ],
            temperature: 1.0,
            max_tokens: 4095,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            response_format: ResponseFormat::text(),
        };

        self.chat(&request).await
    }

    /// Generate a short title for a narrative.
    pub async fn generate_title(&self, narrative: &str) -> OpenAiResult<String> {
        let request = ChatRequest {
            model: self.config.title_model.clone(),
            messages: vec![
                ChatMessage::system(TITLE_PERSONA),
                ChatMessage::user(format!(
                    "Direct answer only. Generate a title for the following narrative text: \n{narrative}"
                )),
            ],
            temperature: 1.0,
            max_tokens: 1000,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            response_format: ResponseFormat::text(),
        };

        let title = self.chat(&request).await?;
        Ok(strip_surrounding_quotes(&title).to_string())
    }

    /// Synthesize speech audio for a narrative, returning raw mp3 bytes.
    pub async fn synthesize_speech(&self, text: &str) -> OpenAiResult<Vec<u8>> {
        let url = format!("{}/audio/speech", self.config.base_url);
        let request = SpeechRequest {
            model: self.config.speech_model.clone(),
            input: text.to_string(),
            voice: self.config.voice.clone(),
            response_format: "mp3".to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(OpenAiError::EmptyResponse);
        }
        info!(audio_bytes = bytes.len(), "Speech synthesized");
        Ok(bytes.to_vec())
    }

    /// Run one chat completions call and return its stop-completed text.
    async fn chat(&self, request: &ChatRequest) -> OpenAiResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Api { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        extract_stop_text(chat)
    }
}

/// Unwrap the single candidate, enforcing the normal stop condition.
///
/// A response truncated (`length`) or filtered (`content_filter`) must
/// never become narrative or title text.
fn extract_stop_text(response: ChatResponse) -> OpenAiResult<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| OpenAiError::invalid_response("No choices in response"))?;

    let finish_reason = choice.finish_reason.unwrap_or_else(|| "unknown".to_string());
    if finish_reason != "stop" {
        return Err(OpenAiError::IncompleteGeneration { finish_reason });
    }

    let text = choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    if text.is_empty() {
        return Err(OpenAiError::EmptyResponse);
    }
    Ok(text)
}

/// Trim quote characters models like to wrap titles in.
fn strip_surrounding_quotes(title: &str) -> &str {
    title.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}
