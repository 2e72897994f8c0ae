//! Client configuration
//!
//! Everything the pipelines need to talk to the backend and cut audio
//! chunks, with environment overrides for the values people actually tune.

use crate::{CompanionError, Result};
use std::time::Duration;

/// Environment variable overriding the backend base URL.
pub const SERVER_URL_ENV: &str = "COMPANION_SERVER_URL";

/// Environment variable overriding the default model name.
pub const MODEL_ENV: &str = "COMPANION_MODEL";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Base URL of the companion server.
    pub server_url: String,

    /// Model name pre-filled in the UI. The user can edit it freely; the
    /// string is passed to the backend verbatim.
    pub default_model: String,

    /// How much captured audio to accumulate before streaming a chunk to
    /// the transcription endpoint.
    pub chunk_interval: Duration,

    /// TCP connect timeout for backend requests.
    pub connect_timeout: Duration,

    /// Overall timeout per backend request. Transcription of a long clip
    /// can take a while, so this is generous.
    pub request_timeout: Duration,

    /// Whether to open the microphone at startup.
    pub enable_audio_input: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            default_model: "llama2:13b".to_string(),
            chunk_interval: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            enable_audio_input: true,
        }
    }
}

impl SessionConfig {
    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url;
            }
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config.default_model = model;
            }
        }
        config
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_chunk_interval(mut self, interval: Duration) -> Self {
        self.chunk_interval = interval;
        self
    }

    /// Disable audio input (text-only mode).
    pub fn without_audio_input(mut self) -> Self {
        self.enable_audio_input = false;
        self
    }

    /// Validate the configuration before wiring anything up.
    pub fn validate(&self) -> Result<()> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(CompanionError::ConfigError(format!(
                "Server URL must be http(s): {}",
                self.server_url
            )));
        }
        if self.default_model.trim().is_empty() {
            return Err(CompanionError::ConfigError(
                "Default model name is empty".to_string(),
            ));
        }
        if self.chunk_interval.is_zero() {
            return Err(CompanionError::ConfigError(
                "Chunk interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model, "llama2:13b");
        assert!(config.enable_audio_input);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = SessionConfig::default()
            .with_server_url("http://example.com:9090")
            .with_model("mistral:7b")
            .without_audio_input();

        assert_eq!(config.server_url, "http://example.com:9090");
        assert_eq!(config.default_model, "mistral:7b");
        assert!(!config.enable_audio_input);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(SessionConfig::default()
            .with_server_url("localhost:8080")
            .validate()
            .is_err());
        assert!(SessionConfig::default()
            .with_model("  ")
            .validate()
            .is_err());
        assert!(SessionConfig::default()
            .with_chunk_interval(Duration::ZERO)
            .validate()
            .is_err());
    }
}
