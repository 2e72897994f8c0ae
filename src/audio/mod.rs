pub mod buffer;
#[cfg(feature = "audio-io")]
pub mod input;
pub mod preprocessor;
pub mod resampler;
pub mod wav;

pub use buffer::AudioRingBuffer;
#[cfg(feature = "audio-io")]
pub use input::AudioInput;
pub use preprocessor::prepare_for_upload;
pub use resampler::AudioResampler;
pub use wav::{encode_wav, UPLOAD_SAMPLE_RATE};
