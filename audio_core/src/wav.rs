use base64::{engine::general_purpose, Engine as _};

use crate::AudioError;

/// PCM format parameters for a single conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavParams {
    pub sample_rate: u32,
    pub num_channels: u16,
    pub bits_per_sample: u16,
}

impl WavParams {
    fn validate(&self) -> Result<(), AudioError> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidParameter("sample_rate"));
        }
        if self.num_channels == 0 {
            return Err(AudioError::InvalidParameter("num_channels"));
        }
        if self.bits_per_sample == 0 {
            return Err(AudioError::InvalidParameter("bits_per_sample"));
        }
        Ok(())
    }

    /// Bytes consumed per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.num_channels) * u32::from(self.bits_per_sample) / 8
    }
}

/// Decode a standard-alphabet base64 payload into raw bytes.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, AudioError> {
    Ok(general_purpose::STANDARD.decode(payload)?)
}

/// Encode raw bytes as standard-alphabet base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Wrap raw little-endian PCM bytes in a RIFF/WAVE container.
///
/// The header is the fixed 44-byte uncompressed-PCM layout; the input bytes
/// follow it verbatim. An empty input yields a valid header-only file.
pub fn pcm_to_wav(pcm: &[u8], params: &WavParams) -> Result<Vec<u8>, AudioError> {
    params.validate()?;

    // WAV header fields
    let byte_rate: u32 = params.byte_rate();
    let block_align: u16 =
        (u32::from(params.num_channels) * u32::from(params.bits_per_sample) / 8) as u16;
    let data_size: u32 = pcm.len() as u32;
    let riff_size: u32 = 36 + data_size;

    let mut out = Vec::<u8>::with_capacity(44 + pcm.len());

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&params.num_channels.to_le_bytes());
    out.extend_from_slice(&params.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&params.bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);

    Ok(out)
}

/// Playback duration in milliseconds for `data_len` bytes of PCM.
pub fn wav_duration_ms(data_len: usize, params: &WavParams) -> u64 {
    let byte_rate = params.byte_rate();
    if byte_rate == 0 {
        return 0;
    }
    data_len as u64 * 1000 / u64::from(byte_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONO_24K: WavParams = WavParams {
        sample_rate: 24_000,
        num_channels: 1,
        bits_per_sample: 16,
    };

    fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn output_is_header_plus_payload() {
        let pcm = vec![0u8; 4800];
        let wav = pcm_to_wav(&pcm, &MONO_24K).unwrap();
        assert_eq!(wav.len(), pcm.len() + 44);
        assert_eq!(&wav[44..], &pcm[..]);
    }

    #[test]
    fn header_fields_match_input() {
        let pcm = vec![7u8; 1000];
        let wav = pcm_to_wav(&pcm, &MONO_24K).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32_le(&wav, 4), 36 + 1000);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(read_u32_le(&wav, 16), 16);
        assert_eq!(read_u16_le(&wav, 20), 1);
        assert_eq!(read_u16_le(&wav, 22), 1);
        assert_eq!(read_u32_le(&wav, 24), 24_000);
        assert_eq!(read_u32_le(&wav, 28), 48_000); // 24000 * 1 * 16 / 8
        assert_eq!(read_u16_le(&wav, 32), 2);
        assert_eq!(read_u16_le(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(read_u32_le(&wav, 40), 1000);
    }

    #[test]
    fn empty_input_yields_header_only_file() {
        let wav = pcm_to_wav(&[], &MONO_24K).unwrap();
        assert_eq!(wav.len(), 44);
        assert_eq!(read_u32_le(&wav, 24), 24_000);
        assert_eq!(read_u32_le(&wav, 40), 0);
        assert_eq!(read_u32_le(&wav, 4), 36);
    }

    #[test]
    fn conversion_is_deterministic() {
        let pcm = vec![1u8, 2, 3, 4];
        let a = pcm_to_wav(&pcm, &MONO_24K).unwrap();
        let b = pcm_to_wav(&pcm, &MONO_24K).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stereo_byte_rate_and_block_align() {
        let params = WavParams {
            sample_rate: 44_100,
            num_channels: 2,
            bits_per_sample: 16,
        };
        let wav = pcm_to_wav(&[0u8; 8], &params).unwrap();
        assert_eq!(read_u32_le(&wav, 28), 44_100 * 2 * 2);
        assert_eq!(read_u16_le(&wav, 32), 4);
    }

    #[test]
    fn hound_reads_back_the_format() {
        let pcm: Vec<u8> = (0..480u16).flat_map(|s| (s as i16).to_le_bytes()).collect();
        let wav = pcm_to_wav(&pcm, &MONO_24K).unwrap();

        let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(reader.len(), 480);
    }

    #[test]
    fn base64_payload_converts_end_to_end() {
        let pcm = decode_base64("AAEC").unwrap();
        assert_eq!(pcm, vec![0, 1, 2]);

        let wav = pcm_to_wav(&pcm, &MONO_24K).unwrap();
        assert_eq!(wav.len(), 47);
        assert_eq!(read_u32_le(&wav, 40), 3);
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let err = decode_base64("not!base64").unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));

        let err = decode_base64("AAA").unwrap_err();
        assert!(matches!(err, AudioError::Decode(_)));
    }

    #[test]
    fn base64_round_trip() {
        let bytes = vec![0u8, 1, 2, 250, 255];
        assert_eq!(decode_base64(&encode_base64(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn zero_parameters_are_rejected() {
        for params in [
            WavParams { sample_rate: 0, ..MONO_24K },
            WavParams { num_channels: 0, ..MONO_24K },
            WavParams { bits_per_sample: 0, ..MONO_24K },
        ] {
            let err = pcm_to_wav(&[0u8; 2], &params).unwrap_err();
            assert!(matches!(err, AudioError::InvalidParameter(_)));
        }
    }

    #[test]
    fn duration_from_byte_rate() {
        // 48000 bytes/sec at 24 kHz mono 16-bit
        assert_eq!(wav_duration_ms(48_000, &MONO_24K), 1000);
        assert_eq!(wav_duration_ms(24_000, &MONO_24K), 500);
        assert_eq!(wav_duration_ms(0, &MONO_24K), 0);
    }
}
