//! Common utilities for integration tests

use std::sync::{atomic::AtomicU64, Arc};

use async_trait::async_trait;
use axum::Router;

use gemini_core::{GenerationError, SpeechPayload, SpeechProvider};
use server::{api_router, config::ServerConfig, session::Session, AppState};

/// Canned provider behaviors for exercising the handlers offline.
#[allow(dead_code)]
pub enum MockBehavior {
    Payload(String),
    Empty,
    Reject,
}

pub struct MockProvider {
    behavior: MockBehavior,
}

#[async_trait]
impl SpeechProvider for MockProvider {
    async fn synthesize(&self, _text: &str) -> Result<SpeechPayload, GenerationError> {
        match &self.behavior {
            MockBehavior::Payload(audio_base64) => Ok(SpeechPayload {
                audio_base64: audio_base64.clone(),
                mime_type: Some("audio/pcm;rate=24000".to_string()),
            }),
            MockBehavior::Empty => Err(GenerationError::EmptyPayload),
            MockBehavior::Reject => Err(GenerationError::Rejected {
                status: 403,
                message: "API key not valid".to_string(),
            }),
        }
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        api_key: "test-key".to_string(),
        model: gemini_core::DEFAULT_MODEL.to_string(),
        voice: gemini_core::DEFAULT_VOICE.to_string(),
        rate_limit_per_minute: 60,
        generation_timeout_secs: 5,
        request_timeout_secs: 5,
        cors_allowed_origins: None,
    }
}

pub fn test_state(behavior: MockBehavior) -> AppState {
    AppState {
        provider: Arc::new(MockProvider { behavior }),
        session: Arc::new(Session::new()),
        request_count: Arc::new(AtomicU64::new(0)),
        config: test_config(),
    }
}

pub fn app_for_state(state: AppState) -> Router {
    api_router().with_state(state)
}

/// Create a test app instance
pub fn create_test_app(behavior: MockBehavior) -> Router {
    app_for_state(test_state(behavior))
}
