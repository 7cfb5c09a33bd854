//! Conversions between the sample representations used by audio devices
//! (`f32` in `[-1.0, 1.0]`) and the wire format of the Gemini audio APIs
//! (base64-encoded 16-bit little-endian PCM).

use crate::{GenerationError, GenerationResult};
use base64::Engine as _;

/// Sample rate of audio captured and sent to a live session.
pub const INPUT_SAMPLE_RATE: u32 = 16_000;
/// Sample rate of audio produced by the speech and live models.
pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

pub fn base64_to_i16sample(b64: &str) -> GenerationResult<Vec<i16>> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| GenerationError::Invariant("", format!("Failed to decode base64: {e}")))?;

    if bytes.len() % 2 != 0 {
        return Err(GenerationError::Invariant(
            "",
            "Base64 data length is not a multiple of 2".to_string(),
        ));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect())
}

pub fn i16sample_to_base64(samples: &[i16]) -> String {
    let mut result_bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        result_bytes.extend_from_slice(&sample.to_le_bytes());
    }

    base64::engine::general_purpose::STANDARD.encode(result_bytes)
}

/// Scales a float sample by 32768, saturating at the i16 range.
#[allow(clippy::cast_possible_truncation)]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * 32768.0).clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

pub fn i16_to_f32(sample: i16) -> f32 {
    f32::from(sample) / 32768.0
}

/// Encodes float samples as base64 PCM16, the framing used for realtime
/// input chunks.
pub fn encode_pcm16(samples: &[f32]) -> String {
    let converted: Vec<i16> = samples.iter().copied().map(f32_to_i16).collect();
    i16sample_to_base64(&converted)
}

/// Decodes base64 PCM16 into float samples ready for playback.
pub fn decode_pcm16(b64: &str) -> GenerationResult<Vec<f32>> {
    Ok(base64_to_i16sample(b64)?
        .into_iter()
        .map(i16_to_f32)
        .collect())
}

/// Playback duration in seconds of interleaved samples.
#[allow(clippy::cast_precision_loss)]
pub fn duration_secs(sample_count: usize, sample_rate: u32, channels: u16) -> f64 {
    if sample_rate == 0 || channels == 0 {
        return 0.0;
    }
    sample_count as f64 / f64::from(channels) / f64::from(sample_rate)
}

/// Mixes interleaved multi-channel audio down to mono by averaging.
#[allow(clippy::cast_precision_loss)]
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = usize::from(n);
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

/// Resamples mono audio with linear interpolation.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return Vec::new();
    }
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = f64::from(from_rate) / f64::from(to_rate);
    let out_len = ((samples.len() as f64) / ratio).floor() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * ratio;
            let index = position.floor() as usize;
            let frac = (position - index as f64) as f32;
            let a = samples[index.min(last)];
            let b = samples[(index + 1).min(last)];
            a + (b - a) * frac
        })
        .collect()
}

/// Reads the `rate=` parameter of a PCM mime type such as
/// `audio/L16;codec=pcm;rate=24000`.
pub fn parse_sample_rate(mime_type: &str) -> Option<u32> {
    mime_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.trim().split_once('=')?;
        if key.eq_ignore_ascii_case("rate") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_to_i16_scales_and_clamps() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(0.5), 16384);
        assert_eq!(f32_to_i16(-1.0), i16::MIN);
        assert_eq!(f32_to_i16(1.0), i16::MAX);
        assert_eq!(f32_to_i16(3.0), i16::MAX);
    }

    #[test]
    fn pcm16_encoding_is_little_endian() {
        let encoded = i16sample_to_base64(&[1, -2]);
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0xFE, 0xFF]);
        assert_eq!(base64_to_i16sample(&encoded).unwrap(), vec![1, -2]);
    }

    #[test]
    fn decode_rejects_odd_length() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0x01, 0x02, 0x03]);
        assert!(decode_pcm16(&encoded).is_err());
    }

    #[test]
    fn duration_of_one_second_at_24k() {
        assert!((duration_secs(24_000, OUTPUT_SAMPLE_RATE, 1) - 1.0).abs() < f64::EPSILON);
        assert!((duration_secs(48_000, OUTPUT_SAMPLE_RATE, 2) - 1.0).abs() < f64::EPSILON);
        assert!(duration_secs(10, 0, 1).abs() < f64::EPSILON);
    }

    #[test]
    fn downmix_averages_frames() {
        let mono = downmix_to_mono(&[0.5, -0.5, 0.2, 0.4], 2);
        assert_eq!(mono.len(), 2);
        assert!(mono[0].abs() < 1e-6);
        assert!((mono[1] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn resample_48k_to_16k_keeps_a_third() {
        let out = resample_linear(&vec![0.25; 480], 48_000, INPUT_SAMPLE_RATE);
        assert_eq!(out.len(), 160);
        assert!(out.iter().all(|s| (s - 0.25).abs() < 1e-6));
    }

    #[test]
    fn parses_rate_from_mime() {
        assert_eq!(parse_sample_rate("audio/L16;codec=pcm;rate=24000"), Some(24_000));
        assert_eq!(parse_sample_rate("audio/pcm; rate=16000"), Some(16_000));
        assert_eq!(parse_sample_rate("audio/pcm"), None);
    }
}
