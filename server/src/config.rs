// Configuration for the server, read from the environment at startup.

use std::time::Duration;

use anyhow::Context;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Credential for the generation service. Required.
    pub api_key: String,
    pub model: String,
    pub voice: String,
    pub rate_limit_per_minute: u32,
    pub generation_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration. A missing `GEMINI_API_KEY` is fatal here, at
    /// startup, rather than on the first generation request.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .context("GEMINI_API_KEY environment variable not set")?;

        let model = std::env::var("GEMINI_TTS_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| gemini_core::DEFAULT_MODEL.to_string());

        let voice = std::env::var("GEMINI_TTS_VOICE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| gemini_core::DEFAULT_VOICE.to_string());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8085);

        let rate_limit_per_minute = std::env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let generation_timeout_secs = std::env::var("GENERATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(90);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        Ok(Self {
            port,
            api_key,
            model,
            voice,
            rate_limit_per_minute,
            generation_timeout_secs,
            request_timeout_secs,
            cors_allowed_origins,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
