pub mod pipeline;

pub use pipeline::{ChatCommand, ChatEvent, ChatPipeline};
