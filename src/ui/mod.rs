pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::CompanionApp;
pub use state::{AppState, PendingResponse, RecordingState};
pub use theme::Theme;
