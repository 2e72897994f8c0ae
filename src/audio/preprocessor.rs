use crate::audio::resampler::AudioResampler;
use crate::audio::wav::UPLOAD_SAMPLE_RATE;
use crate::Result;
use tracing::debug;

/// Normalize audio to have peak amplitude of 0.95
pub fn normalize_audio(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let peak = samples
        .iter()
        .map(|&s| s.abs())
        .fold(0.0f32, |max, val| max.max(val));

    if peak == 0.0 || peak.is_nan() {
        return samples.to_vec();
    }

    let target_peak = 0.95;
    let gain = target_peak / peak;

    samples.iter().map(|&s| s * gain).collect()
}

/// Subtract the mean to remove DC offset
pub fn remove_dc_offset(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mean: f32 = samples.iter().sum::<f32>() / samples.len() as f32;
    samples.iter().map(|&s| s - mean).collect()
}

/// Prepare captured mono audio for upload to the transcription endpoints:
/// DC removal, resample to 16 kHz, peak normalization.
///
/// The server runs its own conversion on whatever it receives, but sending
/// clean 16 kHz mono keeps chunk payloads small and deterministic.
pub fn prepare_for_upload(input: &[f32], input_sample_rate: u32) -> Result<Vec<f32>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Preparing {} samples at {} Hz for upload",
        input.len(),
        input_sample_rate
    );

    let no_dc = remove_dc_offset(input);

    let resampled = if input_sample_rate != UPLOAD_SAMPLE_RATE {
        let mut resampler = AudioResampler::new(input_sample_rate, UPLOAD_SAMPLE_RATE)?;
        resampler.resample(&no_dc)?
    } else {
        no_dc
    };

    Ok(normalize_audio(&resampled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_audio() {
        let input = vec![0.5, -0.3, 0.8, -0.2];
        let output = normalize_audio(&input);
        let peak = output.iter().map(|&s| s.abs()).fold(0.0, f32::max);
        assert!((peak - 0.95).abs() < 0.01);
    }

    #[test]
    fn test_normalize_silence_is_unchanged() {
        let input = vec![0.0; 64];
        assert_eq!(normalize_audio(&input), input);
    }

    #[test]
    fn test_remove_dc_offset() {
        let input = vec![1.0, 1.1, 0.9, 1.0];
        let output = remove_dc_offset(&input);
        let mean: f32 = output.iter().sum::<f32>() / output.len() as f32;
        assert!(mean.abs() < 0.0001);
    }

    #[test]
    fn test_prepare_for_upload_at_target_rate() {
        let input: Vec<f32> = (0..1600).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = prepare_for_upload(&input, UPLOAD_SAMPLE_RATE).unwrap();
        assert_eq!(output.len(), input.len());
    }

    #[test]
    fn test_prepare_for_upload_empty() {
        assert!(prepare_for_upload(&[], 48000).unwrap().is_empty());
    }
}
