use crate::{CompanionError, Result};
use rubato::{FftFixedIn, Resampler};

/// Fixed input chunk size fed to rubato. Tails shorter than this are
/// zero-padded and the matching output length trimmed back off.
const CHUNK_SIZE: usize = 1024;

/// Mono audio resampler built on rubato's FFT resampler.
pub struct AudioResampler {
    resampler: Option<FftFixedIn<f32>>,
    from_rate: u32,
    to_rate: u32,
}

impl AudioResampler {
    /// Create a resampler between the two rates. Identical rates turn the
    /// resampler into a passthrough.
    pub fn new(from_rate: u32, to_rate: u32) -> Result<Self> {
        if from_rate == 0 || to_rate == 0 {
            return Err(CompanionError::AudioProcessingError(format!(
                "Invalid sample rates: {} -> {}",
                from_rate, to_rate
            )));
        }

        let resampler = if from_rate != to_rate {
            Some(
                FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, CHUNK_SIZE, 1, 1)
                    .map_err(|e| {
                        CompanionError::AudioProcessingError(format!(
                            "Failed to create resampler: {}",
                            e
                        ))
                    })?,
            )
        } else {
            None
        };

        Ok(Self {
            resampler,
            from_rate,
            to_rate,
        })
    }

    pub fn from_rate(&self) -> u32 {
        self.from_rate
    }

    pub fn to_rate(&self) -> u32 {
        self.to_rate
    }

    /// Resample a whole buffer of mono samples.
    pub fn resample(&mut self, input: &[f32]) -> Result<Vec<f32>> {
        let Some(resampler) = self.resampler.as_mut() else {
            return Ok(input.to_vec());
        };

        if input.is_empty() {
            return Ok(Vec::new());
        }

        let ratio = self.to_rate as f64 / self.from_rate as f64;
        let mut output = Vec::with_capacity((input.len() as f64 * ratio) as usize + CHUNK_SIZE);

        let mut pos = 0;
        while pos + CHUNK_SIZE <= input.len() {
            let chunk = &input[pos..pos + CHUNK_SIZE];
            let resampled = resampler.process(&[chunk], None).map_err(|e| {
                CompanionError::AudioProcessingError(format!("Resampling failed: {}", e))
            })?;
            output.extend_from_slice(&resampled[0]);
            pos += CHUNK_SIZE;
        }

        // Zero-pad the tail to a full chunk, then trim the output back to
        // the length the real samples account for.
        let remaining = input.len() - pos;
        if remaining > 0 {
            let mut tail = vec![0.0f32; CHUNK_SIZE];
            tail[..remaining].copy_from_slice(&input[pos..]);
            let resampled = resampler.process(&[&tail], None).map_err(|e| {
                CompanionError::AudioProcessingError(format!("Resampling failed: {}", e))
            })?;
            let keep = ((remaining as f64) * ratio).round() as usize;
            output.extend_from_slice(&resampled[0][..keep.min(resampled[0].len())]);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_when_rates_match() {
        let mut resampler = AudioResampler::new(16000, 16000).unwrap();
        let input: Vec<f32> = (0..100).map(|i| (i as f32 * 0.01).sin()).collect();
        let output = resampler.resample(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn downsample_halves_length_roughly() {
        let mut resampler = AudioResampler::new(48000, 16000).unwrap();
        let input: Vec<f32> = (0..48000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resampler.resample(&input).unwrap();
        // A second of input should come out as roughly a second of output
        let expected = 16000;
        assert!(
            (output.len() as i64 - expected).unsigned_abs() < 2048,
            "got {} samples, expected ~{}",
            output.len(),
            expected
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let mut resampler = AudioResampler::new(44100, 16000).unwrap();
        assert!(resampler.resample(&[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_zero_rate() {
        assert!(AudioResampler::new(0, 16000).is_err());
        assert!(AudioResampler::new(16000, 0).is_err());
    }
}
