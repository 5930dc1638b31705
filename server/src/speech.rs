//! One voice generation: provider call, payload decode, WAV wrap.

use std::time::Duration;

use audio_core::{decode_base64, pcm_to_wav, wav_duration_ms, WavParams};
use gemini_core::{GenerationError, SpeechProvider};

use crate::error::ApiError;

/// PCM format of the generation service's inline payloads.
pub const PROVIDER_FORMAT: WavParams = WavParams {
    sample_rate: 24_000,
    num_channels: 1,
    bits_per_sample: 16,
};

/// Fixed file name offered for downloads.
pub const DOWNLOAD_FILE_NAME: &str = "bangla-ai-voice.wav";

/// MIME type of the produced artifact.
pub const WAV_MIME: &str = "audio/wav";

/// A finished, playable generation result.
#[derive(Debug, Clone)]
pub struct VoiceClip {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub duration_ms: u64,
}

/// Run a single generation attempt and wrap the returned payload. No retry:
/// every failure surfaces to the caller as one user-readable error.
pub async fn synthesize_clip(
    provider: &dyn SpeechProvider,
    text: &str,
    timeout: Duration,
) -> Result<VoiceClip, ApiError> {
    let payload = match tokio::time::timeout(timeout, provider.synthesize(text)).await {
        Ok(result) => result?,
        Err(_) => return Err(GenerationError::TimedOut(timeout.as_secs()).into()),
    };

    let pcm = decode_base64(&payload.audio_base64)?;
    let wav = pcm_to_wav(&pcm, &PROVIDER_FORMAT)?;
    let duration_ms = wav_duration_ms(pcm.len(), &PROVIDER_FORMAT);

    Ok(VoiceClip {
        wav,
        sample_rate: PROVIDER_FORMAT.sample_rate,
        duration_ms,
    })
}
