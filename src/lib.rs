pub mod api;
pub mod audio;
pub mod chat;
pub mod messages;
pub mod session;
pub mod transcription;
pub mod ui;
pub mod utils;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CompanionError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-2xx response from the backend. The payload is the status line
    /// ("500 Internal Server Error") so the UI can render it verbatim.
    #[error("{0}")]
    ServerStatus(String),

    #[error("Transcription error: {0}")]
    TranscriptionError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for CompanionError {
    fn from(e: std::io::Error) -> Self {
        CompanionError::IOError(e.to_string())
    }
}

impl From<reqwest::Error> for CompanionError {
    fn from(e: reqwest::Error) -> Self {
        CompanionError::HttpError(e.to_string())
    }
}

impl CompanionError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            CompanionError::AudioDeviceError(_) => false,
            // Network and server errors clear up on resubmission
            CompanionError::HttpError(_) => true,
            CompanionError::ServerStatus(_) => true,
            CompanionError::TranscriptionError(_) => true,
            CompanionError::AudioProcessingError(_) => true,
            CompanionError::IOError(_) => false,
            CompanionError::ConfigError(_) => false,
            CompanionError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            CompanionError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            CompanionError::HttpError(_) => {
                "Could not reach the companion server. Is it running?".to_string()
            }
            CompanionError::ServerStatus(status) => {
                format!("The server rejected the request ({}).", status)
            }
            CompanionError::TranscriptionError(_) => {
                "Transcription failed. Please try again.".to_string()
            }
            CompanionError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            CompanionError::IOError(_) => "File system error occurred.".to_string(),
            CompanionError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            CompanionError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CompanionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_status_renders_status_line_verbatim() {
        let err = CompanionError::ServerStatus("500 Internal Server Error".to_string());
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn transient_errors_are_recoverable() {
        assert!(CompanionError::HttpError("timed out".into()).is_recoverable());
        assert!(CompanionError::ServerStatus("502 Bad Gateway".into()).is_recoverable());
        assert!(!CompanionError::ConfigError("bad url".into()).is_recoverable());
    }
}
