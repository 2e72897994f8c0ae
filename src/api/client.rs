//! Typed wrapper around `reqwest` for the four backend endpoints.

use crate::api::types::{ChatRequest, ChatResponse, HistoryResponse, TranscribeResponse};
use crate::session::SessionConfig;
use crate::{CompanionError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use tracing::debug;

/// HTTP client bound to a companion server base URL.
///
/// All methods are async; the pipelines call them through a worker-owned
/// tokio runtime so the UI thread never blocks on the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from the session configuration.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CompanionError::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-2xx responses to a `ServerStatus` error carrying the status
    /// line, so callers can surface it exactly as the server said it.
    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(CompanionError::ServerStatus(status_line(status)))
        }
    }

    /// `POST /api/chat` with the message and model name.
    pub async fn chat(&self, message: &str, model: &str) -> Result<String> {
        let url = self.url("/api/chat");
        let body = ChatRequest {
            message: message.to_string(),
            model: model.to_string(),
        };

        debug!("POST {} (model: {})", url, model);

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check_status(response)?;

        let parsed: ChatResponse = response.json().await?;
        Ok(parsed.response)
    }

    /// `GET /api/history`.
    pub async fn history(&self) -> Result<Vec<crate::api::types::HistoryEntry>> {
        let url = self.url("/api/history");

        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response)?;

        let parsed: HistoryResponse = response.json().await?;
        Ok(parsed.history)
    }

    /// `POST /api/transcribe` with the finished clip as a multipart
    /// `audio` field.
    pub async fn transcribe(&self, wav: Vec<u8>) -> Result<String> {
        let url = self.url("/api/transcribe");

        debug!("POST {} ({} bytes)", url, wav.len());

        let audio_part = Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| CompanionError::HttpError(format!("Failed to create audio part: {}", e)))?;
        let form = Form::new().part("audio", audio_part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response)?;

        let parsed: TranscribeResponse = response.json().await?;
        Ok(parsed.text)
    }

    /// `POST /api/transcribe-stream` with one in-progress chunk. The server
    /// accumulates chunks per `session_id` and returns the transcription of
    /// everything received so far.
    pub async fn transcribe_chunk(&self, session_id: &str, wav: Vec<u8>) -> Result<String> {
        let url = self.url("/api/transcribe-stream");

        debug!("POST {} (session: {}, {} bytes)", url, session_id, wav.len());

        let audio_part = Part::bytes(wav)
            .file_name("chunk.wav")
            .mime_str("audio/wav")
            .map_err(|e| CompanionError::HttpError(format!("Failed to create audio part: {}", e)))?;
        let form = Form::new()
            .text("session_id", session_id.to_string())
            .part("audio", audio_part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response)?;

        let parsed: TranscribeResponse = response.json().await?;
        Ok(parsed.text)
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_includes_canonical_reason() {
        assert_eq!(
            status_line(StatusCode::INTERNAL_SERVER_ERROR),
            "500 Internal Server Error"
        );
        assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = SessionConfig::default().with_server_url("http://localhost:8080/");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/api/chat"), "http://localhost:8080/api/chat");
    }
}
