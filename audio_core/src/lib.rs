//! Audio payload conversion: base64-encoded raw PCM in, playable WAV out.

mod wav;

pub use wav::{decode_base64, encode_base64, pcm_to_wav, wav_duration_ms, WavParams};

use thiserror::Error;

/// Errors produced while turning a provider payload into a WAV container.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid base64 audio payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("invalid audio format parameter: {0} must be greater than zero")]
    InvalidParameter(&'static str),
}
