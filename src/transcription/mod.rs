pub mod pipeline;

pub use pipeline::{TranscriptionCommand, TranscriptionEvent, TranscriptionPipeline};
