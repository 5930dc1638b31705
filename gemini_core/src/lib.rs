//! Client for Google's Gemini speech-generation endpoint.
//!
//! The server talks to the API through the [`SpeechProvider`] trait so tests
//! can substitute a canned backend; [`GeminiClient`] is the real one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generation model used for speech output.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Prebuilt voice used when none is configured. The intended voice
/// ("Enceladus") is not offered by the API; "Kore" stands in for it.
pub const DEFAULT_VOICE: &str = "Kore";

/// Fixed instruction prepended to every prompt.
pub const ACCENT_INSTRUCTION: &str = "Speak in a clear, standard Bengali accent: ";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Failures of a single generation attempt. Never retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("voice service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("voice service rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("no audio data received from the voice service")]
    EmptyPayload,

    #[error("voice service did not respond within {0} seconds")]
    TimedOut(u64),
}

/// Inline audio returned by a provider, still base64-encoded.
#[derive(Debug, Clone)]
pub struct SpeechPayload {
    pub audio_base64: String,
    pub mime_type: Option<String>,
}

/// Seam between the HTTP layer and a concrete generation backend.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SpeechPayload, GenerationError>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseModalities")]
    response_modalities: [&'a str; 1],
    #[serde(rename = "speechConfig")]
    speech_config: SpeechConfig<'a>,
}

#[derive(Serialize)]
struct SpeechConfig<'a> {
    #[serde(rename = "voiceConfig")]
    voice_config: VoiceConfig<'a>,
}

#[derive(Serialize)]
struct VoiceConfig<'a> {
    #[serde(rename = "prebuiltVoiceConfig")]
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Serialize)]
struct PrebuiltVoiceConfig<'a> {
    #[serde(rename = "voiceName")]
    voice_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    data: Option<String>,
}

fn build_request<'a>(prompt: &'a str, voice: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_modalities: ["AUDIO"],
            speech_config: SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
                },
            },
        },
    }
}

/// First inline audio payload of the first candidate.
fn extract_inline_audio(
    response: GenerateContentResponse,
) -> Result<SpeechPayload, GenerationError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.inline_data)
        .find_map(|d| match d.data {
            Some(data) if !data.is_empty() => Some(SpeechPayload {
                audio_base64: data,
                mime_type: d.mime_type,
            }),
            _ => None,
        })
        .ok_or(GenerationError::EmptyPayload)
}

/// Real Gemini backend.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            voice: voice.into(),
        }
    }

    fn request_url(&self) -> String {
        format!("{API_BASE_URL}/{}:generateContent", self.model)
    }
}

#[async_trait]
impl SpeechProvider for GeminiClient {
    async fn synthesize(&self, text: &str) -> Result<SpeechPayload, GenerationError> {
        let prompt = format!("{ACCENT_INSTRUCTION}{text}");
        let body = build_request(&prompt, &self.voice);

        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        extract_inline_audio(parsed)
    }
}
