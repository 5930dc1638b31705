//! HTTP front-end: accepts Bengali text, drives one voice generation at a
//! time, and serves the resulting WAV for playback and download.

pub mod config;
pub mod error;
pub mod session;
pub mod speech;
pub mod validation;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, OnceLock,
};

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use gemini_core::SpeechProvider;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::session::Session;
use crate::speech::{synthesize_clip, DOWNLOAD_FILE_NAME, WAV_MIME};
use crate::validation::validate_generate_request;

pub static START_TIME: OnceLock<std::time::Instant> = OnceLock::new();

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn SpeechProvider>,
    pub session: Arc<Session>,
    pub request_count: Arc<AtomicU64>,
    pub config: ServerConfig,
}

/// All API routes, mounted at the root and under `/api`.
pub fn api_router() -> Router<AppState> {
    let public_api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/generate", post(generate_endpoint))
        .route("/status", get(status_endpoint))
        .route("/download", get(download_endpoint));

    let metrics_api = Router::new().route("/metrics", get(metrics_endpoint));

    let api = Router::new().merge(public_api).merge(metrics_api);

    Router::new().merge(api.clone()).nest("/api", api)
}

pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    text: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    audio_base64: String,
    duration_ms: u64,
    sample_rate: u32,
}

pub async fn generate_endpoint(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_generate_request(&req.text)?;

    let guard = state.session.begin().ok_or(ApiError::Busy)?;
    info!(
        "voice generation started: {} chars",
        req.text.chars().count()
    );

    match synthesize_clip(
        state.provider.as_ref(),
        req.text.trim(),
        state.config.generation_timeout(),
    )
    .await
    {
        Ok(clip) => {
            info!(
                "voice generation finished: {} ms of audio",
                clip.duration_ms
            );
            let response = GenerateResponse {
                audio_base64: audio_core::encode_base64(&clip.wav),
                duration_ms: clip.duration_ms,
                sample_rate: clip.sample_rate,
            };
            guard.complete(clip);
            Ok(Json(response))
        }
        Err(err) => {
            guard.fail(err.to_string());
            Err(err)
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample_rate: Option<u32>,
}

pub async fn status_endpoint(State(state): State<AppState>) -> Json<StatusResponse> {
    let snapshot = state.session.snapshot();
    Json(StatusResponse {
        state: snapshot.phase.as_str(),
        error: snapshot.error,
        duration_ms: snapshot.duration_ms,
        sample_rate: snapshot.sample_rate,
    })
}

pub async fn download_endpoint(State(state): State<AppState>) -> Result<Response, ApiError> {
    let clip = state
        .session
        .clip()
        .ok_or_else(|| ApiError::NotFound("No generated audio available".to_string()))?;

    let headers = [
        (header::CONTENT_TYPE, WAV_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
        ),
    ];
    Ok((headers, clip.wav).into_response())
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub memory_usage_percent: f32,
    pub request_count: u64,
    pub uptime_seconds: u64,
}

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<MetricsResponse> {
    let mut system = sysinfo::System::new();
    system.refresh_cpu();
    system.refresh_memory();

    let cpu_usage = system.global_cpu_info().cpu_usage();
    let memory_used = system.used_memory();
    let memory_total = system.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64 * 100.0) as f32
    } else {
        0.0
    };

    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    Json(MetricsResponse {
        cpu_usage_percent: cpu_usage,
        memory_used_mb: memory_used / 1024 / 1024,
        memory_total_mb: memory_total / 1024 / 1024,
        memory_usage_percent,
        request_count: state.request_count.load(Ordering::Relaxed),
        uptime_seconds: uptime,
    })
}
