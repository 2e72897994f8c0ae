//! Chat pipeline for backend conversation requests
//!
//! Channel-based interface between the UI and the `/api/chat` and
//! `/api/history` endpoints. A worker thread owns a tokio runtime and an
//! `ApiClient`; commands are executed one at a time in arrival order, so
//! no two chat requests are ever in flight together.

use crate::api::{ApiClient, HistoryEntry};
use crate::session::SessionConfig;
use crate::utils::Stopwatch;
use crate::{CompanionError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Commands that can be sent to the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Send a user message to the backend
    Send {
        /// The message text
        message: String,
        /// Model name passed through to the backend verbatim
        model: String,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Fetch the conversation history from the server
    FetchHistory,

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The request left for the backend
    Started { request_id: Uuid },

    /// The backend answered
    Complete {
        /// Response text, with the empty-payload fallback applied
        response: String,
        request_id: Uuid,
        /// Round-trip time in milliseconds
        elapsed_ms: u64,
    },

    /// Fresh server history. Replaces whatever the UI currently shows.
    History { entries: Vec<HistoryEntry> },

    /// A request failed. The string is ready for display as-is.
    Error {
        error: String,
        request_id: Option<Uuid>,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Chat pipeline with channel-based communication
pub struct ChatPipeline {
    config: SessionConfig,
    command_tx: Sender<ChatCommand>,
    command_rx: Receiver<ChatCommand>,
    event_tx: Sender<ChatEvent>,
    event_rx: Receiver<ChatEvent>,
}

impl ChatPipeline {
    pub fn new(config: SessionConfig) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<ChatCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        let _ = std::thread::Builder::new()
            .name("chat-pipeline".to_string())
            .spawn(move || {
                info!("Chat pipeline worker starting");

                let runtime = match Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to create tokio runtime: {}", e);
                        let _ = event_tx.send(ChatEvent::Error {
                            error: format!("Error: {}", e),
                            request_id: None,
                        });
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        return;
                    }
                };

                let client = match ApiClient::new(&config) {
                    Ok(client) => client,
                    Err(e) => {
                        error!("Failed to build API client: {}", e);
                        let _ = event_tx.send(ChatEvent::Error {
                            error: format!("Error: {}", e),
                            request_id: None,
                        });
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        return;
                    }
                };

                info!("Chat pipeline worker ready ({})", config.server_url);

                loop {
                    match command_rx.recv() {
                        Ok(ChatCommand::Send {
                            message,
                            model,
                            request_id,
                        }) => {
                            debug!("Processing chat request: {}", request_id);
                            let _ = event_tx.send(ChatEvent::Started { request_id });

                            let watch = Stopwatch::start();
                            match runtime.block_on(client.chat(&message, &model)) {
                                Ok(response) => {
                                    let elapsed_ms = watch.elapsed_ms();
                                    debug!(
                                        "Chat response: {} chars in {}ms",
                                        response.len(),
                                        elapsed_ms
                                    );

                                    let response = if response.is_empty() {
                                        "(no response)".to_string()
                                    } else {
                                        response
                                    };

                                    let _ = event_tx.send(ChatEvent::Complete {
                                        response,
                                        request_id,
                                        elapsed_ms,
                                    });

                                    // A successful exchange changes the server
                                    // history, so refresh it for the UI.
                                    fetch_history(&runtime, &client, &event_tx);
                                }
                                Err(e) => {
                                    error!("Chat request failed: {}", e);
                                    let _ = event_tx.send(ChatEvent::Error {
                                        error: display_error(&e),
                                        request_id: Some(request_id),
                                    });
                                }
                            }
                        }

                        Ok(ChatCommand::FetchHistory) => {
                            fetch_history(&runtime, &client, &event_tx);
                        }

                        Ok(ChatCommand::Shutdown) => {
                            info!("Chat pipeline worker shutting down");
                            let _ = event_tx.send(ChatEvent::Shutdown);
                            break;
                        }

                        Err(e) => {
                            error!("Command channel error: {}", e);
                            break;
                        }
                    }
                }

                info!("Chat pipeline worker stopped");
            })
            .map_err(|e| CompanionError::ChannelError(format!("Failed to spawn worker: {}", e)))?;

        Ok(())
    }
}

/// Fetch history and emit it. Failures leave the UI's copy untouched:
/// a warning is logged and no `History` event is sent.
fn fetch_history(runtime: &Runtime, client: &ApiClient, event_tx: &Sender<ChatEvent>) {
    match runtime.block_on(client.history()) {
        Ok(entries) => {
            debug!("Fetched {} history entries", entries.len());
            let _ = event_tx.send(ChatEvent::History { entries });
        }
        Err(e) => {
            warn!("History fetch failed: {}", e);
        }
    }
}

/// Format an error the way the response area renders failures:
/// `Error: 500 Internal Server Error` for status failures, `Error: <what
/// went wrong>` for everything else.
fn display_error(e: &CompanionError) -> String {
    format!("Error: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_creation() {
        let pipeline = ChatPipeline::new(SessionConfig::default());

        let _cmd_tx = pipeline.command_sender();
        let _event_rx = pipeline.event_receiver();
    }

    #[test]
    fn test_commands_flow_through_channel() {
        let pipeline = ChatPipeline::new(SessionConfig::default());
        let tx = pipeline.command_sender();

        tx.send(ChatCommand::Send {
            message: "hello".to_string(),
            model: "llama2:13b".to_string(),
            request_id: Uuid::new_v4(),
        })
        .unwrap();
        tx.send(ChatCommand::FetchHistory).unwrap();

        match pipeline.command_rx.recv().unwrap() {
            ChatCommand::Send { message, model, .. } => {
                assert_eq!(message, "hello");
                assert_eq!(model, "llama2:13b");
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert!(matches!(
            pipeline.command_rx.recv().unwrap(),
            ChatCommand::FetchHistory
        ));
    }

    #[test]
    fn test_display_error_formats_status_line() {
        let e = CompanionError::ServerStatus("500 Internal Server Error".to_string());
        assert_eq!(display_error(&e), "Error: 500 Internal Server Error");
    }
}
