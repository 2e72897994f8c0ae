//! Transcription pipeline for streaming and final audio uploads
//!
//! While a recording runs, the recorder hands ~1 s slices of captured
//! audio to this pipeline; each is WAV-encoded and posted to
//! `/api/transcribe-stream` under the recording's session id, and the
//! server replies with the transcription of everything heard so far.
//! After the user sends a finished clip, the whole thing goes to
//! `/api/transcribe` in one request.
//!
//! Uploads execute sequentially on the worker thread in arrival order.
//! That makes the "chunk n+1 answered before chunk n" case structurally
//! impossible instead of something to reconcile later.

use crate::api::ApiClient;
use crate::audio::{encode_wav, prepare_for_upload, UPLOAD_SAMPLE_RATE};
use crate::session::SessionConfig;
use crate::{CompanionError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

/// Commands that can be sent to the transcription pipeline
#[derive(Debug, Clone)]
pub enum TranscriptionCommand {
    /// Upload one in-progress chunk of the active recording
    StreamChunk {
        /// Session id tying the chunk to its recording
        session_id: String,
        /// Captured mono samples at the capture rate
        samples: Vec<f32>,
        /// Capture sample rate of `samples`
        sample_rate: u32,
    },

    /// Upload a finished clip for its final transcription
    FinalizeClip {
        samples: Vec<f32>,
        sample_rate: u32,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the transcription pipeline
#[derive(Debug, Clone)]
pub enum TranscriptionEvent {
    /// Updated live transcription while recording
    Partial { text: String },

    /// Final transcription of a submitted clip
    Final { text: String },

    /// An upload failed. Chunk failures are non-fatal: the recording
    /// keeps going and later chunks may still succeed.
    Error { error: String, fatal: bool },

    /// Pipeline has shut down
    Shutdown,
}

/// Transcription pipeline with channel-based communication
pub struct TranscriptionPipeline {
    config: SessionConfig,
    command_tx: Sender<TranscriptionCommand>,
    command_rx: Receiver<TranscriptionCommand>,
    event_tx: Sender<TranscriptionEvent>,
    event_rx: Receiver<TranscriptionEvent>,
}

impl TranscriptionPipeline {
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

    pub fn command_sender(&self) -> Sender<TranscriptionCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<TranscriptionEvent> {
        self.event_rx.clone()
    }

    /// Start the pipeline worker thread.
    pub fn start_worker(self) -> Result<()> {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        let _ = std::thread::Builder::new()
            .name("transcription-pipeline".to_string())
            .spawn(move || {
                info!("Transcription pipeline worker starting");

                let runtime = match Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to create tokio runtime: {}", e);
                        let _ = event_tx.send(TranscriptionEvent::Error {
                            error: e.to_string(),
                            fatal: true,
                        });
                        let _ = event_tx.send(TranscriptionEvent::Shutdown);
                        return;
                    }
                };

                let client = match ApiClient::new(&config) {
                    Ok(client) => client,
                    Err(e) => {
                        error!("Failed to build API client: {}", e);
                        let _ = event_tx.send(TranscriptionEvent::Error {
                            error: e.to_string(),
                            fatal: true,
                        });
                        let _ = event_tx.send(TranscriptionEvent::Shutdown);
                        return;
                    }
                };

                info!("Transcription pipeline worker ready");

                loop {
                    match command_rx.recv() {
                        Ok(TranscriptionCommand::StreamChunk {
                            session_id,
                            samples,
                            sample_rate,
                        }) => {
                            match upload_chunk(&runtime, &client, &session_id, &samples, sample_rate)
                            {
                                Ok(text) => {
                                    let _ = event_tx.send(TranscriptionEvent::Partial { text });
                                }
                                Err(e) => {
                                    // Streaming transcription is best-effort;
                                    // the final clip upload still covers the
                                    // audio this chunk carried.
                                    warn!("Chunk upload failed: {}", e);
                                    let _ = event_tx.send(TranscriptionEvent::Error {
                                        error: e.to_string(),
                                        fatal: false,
                                    });
                                }
                            }
                        }

                        Ok(TranscriptionCommand::FinalizeClip {
                            samples,
                            sample_rate,
                        }) => match upload_clip(&runtime, &client, &samples, sample_rate) {
                            Ok(text) => {
                                let text = if text.trim().is_empty() {
                                    "(no transcription)".to_string()
                                } else {
                                    text
                                };
                                let _ = event_tx.send(TranscriptionEvent::Final { text });
                            }
                            Err(e) => {
                                error!("Clip transcription failed: {}", e);
                                let _ = event_tx.send(TranscriptionEvent::Error {
                                    error: e.to_string(),
                                    fatal: true,
                                });
                            }
                        },

                        Ok(TranscriptionCommand::Shutdown) => {
                            info!("Transcription pipeline worker shutting down");
                            let _ = event_tx.send(TranscriptionEvent::Shutdown);
                            break;
                        }

                        Err(e) => {
                            error!("Command channel error: {}", e);
                            break;
                        }
                    }
                }

                info!("Transcription pipeline worker stopped");
            })
            .map_err(|e| CompanionError::ChannelError(format!("Failed to spawn worker: {}", e)))?;

        Ok(())
    }
}

fn upload_chunk(
    runtime: &Runtime,
    client: &ApiClient,
    session_id: &str,
    samples: &[f32],
    sample_rate: u32,
) -> Result<String> {
    if samples.is_empty() {
        return Err(CompanionError::TranscriptionError("Empty chunk".to_string()));
    }

    let prepared = prepare_for_upload(samples, sample_rate)?;
    let wav = encode_wav(&prepared, UPLOAD_SAMPLE_RATE)?;
    debug!(
        "Uploading chunk: {} samples -> {} bytes (session {})",
        samples.len(),
        wav.len(),
        session_id
    );
    runtime.block_on(client.transcribe_chunk(session_id, wav))
}

fn upload_clip(
    runtime: &Runtime,
    client: &ApiClient,
    samples: &[f32],
    sample_rate: u32,
) -> Result<String> {
    if samples.is_empty() {
        return Err(CompanionError::TranscriptionError(
            "No audio recorded".to_string(),
        ));
    }

    let prepared = prepare_for_upload(samples, sample_rate)?;
    let wav = encode_wav(&prepared, UPLOAD_SAMPLE_RATE)?;
    debug!(
        "Uploading clip: {} samples -> {} bytes",
        samples.len(),
        wav.len()
    );
    runtime.block_on(client.transcribe(wav))
}
