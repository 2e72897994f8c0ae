//! Session layer: configuration and the recording session loop that feeds
//! captured audio into the transcription pipeline.

pub mod config;
pub mod recorder;

pub use config::SessionConfig;
pub use recorder::{Recorder, RecorderCommand, RecorderEvent, RecorderHandle};
