use crate::{CompanionError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Sample rate every upload is resampled to before WAV encoding.
pub const UPLOAD_SAMPLE_RATE: u32 = 16_000;

/// Encode mono f32 samples as an in-memory 16-bit PCM WAV file.
///
/// Uploads never touch disk; the encoded bytes go straight into the
/// multipart request body.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buffer, spec).map_err(|e| {
            CompanionError::AudioProcessingError(format!("Failed to create WAV writer: {}", e))
        })?;

        for &sample in samples {
            let sample_i16 = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer.write_sample(sample_i16).map_err(|e| {
                CompanionError::AudioProcessingError(format!("Failed to write sample: {}", e))
            })?;
        }

        writer.finalize().map_err(|e| {
            CompanionError::AudioProcessingError(format!("Failed to finalize WAV: {}", e))
        })?;
    }

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_riff_header_and_data() {
        let samples: Vec<f32> = (0..160)
            .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 16000.0).sin() * 0.5)
            .collect();
        let bytes = encode_wav(&samples, UPLOAD_SAMPLE_RATE).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte canonical header + 2 bytes per sample
        assert_eq!(bytes.len(), 44 + samples.len() * 2);
    }

    #[test]
    fn empty_clip_is_a_valid_header() {
        let bytes = encode_wav(&[], UPLOAD_SAMPLE_RATE).unwrap();
        assert_eq!(bytes.len(), 44);
    }

    #[test]
    fn clipping_samples_are_clamped() {
        let bytes = encode_wav(&[2.0, -2.0], UPLOAD_SAMPLE_RATE).unwrap();
        let hi = i16::from_le_bytes([bytes[44], bytes[45]]);
        let lo = i16::from_le_bytes([bytes[46], bytes[47]]);
        assert_eq!(hi, 32767);
        assert_eq!(lo, -32768);
    }
}
