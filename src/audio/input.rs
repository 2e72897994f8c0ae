use crate::{CompanionError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use crossbeam_channel::Sender;
use tracing::{debug, error, info};

/// Microphone capture via the default cpal input device.
///
/// The stream runs for the lifetime of the application and continuously
/// sends mono f32 frames over the channel; the recorder decides whether a
/// frame belongs to an active recording or gets discarded. This keeps
/// start/stop latency off the audio thread entirely.
pub struct AudioInput {
    device: Device,
    config: StreamConfig,
    device_name: String,
    stream: Option<Stream>,
}

impl AudioInput {
    /// Open the default input device without starting capture.
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| CompanionError::AudioDeviceError("No input device available".into()))?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Using input device: {}", device_name);

        let config = device
            .default_input_config()
            .map_err(|e| {
                CompanionError::AudioDeviceError(format!("Failed to get input config: {}", e))
            })?
            .into();

        Ok(Self {
            device,
            config,
            device_name,
            stream: None,
        })
    }

    /// Native sample rate of the input device.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Start the capture stream. Frames are mixed down to mono before
    /// being sent; a full channel drops the frame rather than stalling
    /// the audio callback.
    pub fn start_capture(&mut self, audio_tx: Sender<Vec<f32>>) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let channels = self.config.channels as usize;

        let err_fn = |err| {
            error!("Audio input stream error: {}", err);
        };

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let samples = mix_to_mono(data, channels);
                    if let Err(e) = audio_tx.try_send(samples) {
                        debug!("Dropped capture frame: {}", e);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| {
                CompanionError::AudioDeviceError(format!("Failed to build input stream: {}", e))
            })?;

        stream.play().map_err(|e| {
            CompanionError::AudioDeviceError(format!("Failed to start input stream: {}", e))
        })?;

        self.stream = Some(stream);
        info!(
            "Audio capture started ({} Hz, {} channel(s))",
            self.sample_rate(),
            self.channels()
        );
        Ok(())
    }

    /// Stop the capture stream.
    pub fn stop_capture(&mut self) {
        if self.stream.take().is_some() {
            info!("Audio capture stopped");
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for AudioInput {
    fn drop(&mut self) {
        self.stop_capture();
    }
}

fn mix_to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return data.to_vec();
    }
    data.chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
