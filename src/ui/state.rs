//! Application state management
//!
//! Central state for the Companion UI. All backend work happens on the
//! pipeline workers; the UI mutates this struct directly from event
//! handlers and folds worker events back in once per frame.

use crate::chat::{ChatCommand, ChatEvent};
use crate::messages::MessageStorage;
use crate::session::{RecorderCommand, RecorderEvent, RecorderHandle};
use crate::transcription::{TranscriptionCommand, TranscriptionEvent};
use crate::utils::TimingTracker;
use crossbeam_channel::{Receiver, Sender as ChannelSender};
use std::collections::VecDeque;
use std::time::Duration;
use uuid::Uuid;

/// Recording state for voice input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    /// Not recording
    Idle,
    /// Currently recording audio
    Recording,
    /// Final clip transcription in flight
    Processing,
}

/// Debug information displayed in the debug panel
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    /// Current transcription status
    pub transcription_status: String,
    /// Chat request stats (latency)
    pub chat_status: String,
    /// History fetch status
    pub history_status: String,
    /// Active recording session id
    pub session_status: String,
    /// Current frame rate
    pub fps: f32,
    /// Recent log messages
    pub log_messages: VecDeque<String>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self {
            log_messages: VecDeque::with_capacity(100),
            ..Default::default()
        }
    }

    pub fn add_log(&mut self, message: String) {
        if self.log_messages.len() >= 100 {
            self.log_messages.pop_front();
        }
        self.log_messages.push_back(message);
    }
}

/// The response area: either a request in flight or the last answer
/// (which may be a literal error string).
#[derive(Debug, Clone, Default)]
pub struct PendingResponse {
    /// The response text
    pub text: String,
    /// Whether a chat request is in flight
    pub is_loading: bool,
    /// The request ID this response belongs to
    pub request_id: Option<Uuid>,
    /// Round-trip time of the last completed request
    pub elapsed_ms: Option<u64>,
}

/// Central application state
pub struct AppState {
    /// Conversation history as the server last reported it
    pub messages: MessageStorage,

    /// Current text input
    pub input_text: String,

    /// Model name sent with every chat request
    pub model: String,

    /// Response area state
    pub response: PendingResponse,

    /// Live/final transcription text
    pub transcribed: String,

    /// Recording state
    pub recording_state: RecordingState,

    /// Whether a finished clip is waiting to be sent
    pub has_pending_clip: bool,

    /// Waveform data for visualization (recent audio samples)
    pub waveform_data: Vec<f32>,

    /// Debug information
    pub debug_info: DebugInfo,

    /// Whether to show the debug panel
    pub show_debug_panel: bool,

    /// Channel to send chat commands
    pub chat_command_tx: Option<ChannelSender<ChatCommand>>,

    /// Channel to receive chat events
    pub chat_event_rx: Option<Receiver<ChatEvent>>,

    /// Channel to send transcription commands (shutdown only; uploads go
    /// through the recorder)
    pub transcription_command_tx: Option<ChannelSender<TranscriptionCommand>>,

    /// Channel to receive transcription events
    pub transcription_event_rx: Option<Receiver<TranscriptionEvent>>,

    /// Handle to the recorder loop
    pub recorder: Option<RecorderHandle>,

    /// Last error message
    pub last_error: Option<String>,

    /// Chat round-trip latency window
    pub chat_latency: TimingTracker,

    /// Frame time tracking for FPS
    frame_times: VecDeque<f64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new application state
    pub fn new() -> Self {
        Self {
            messages: MessageStorage::new(),
            input_text: String::new(),
            model: "llama2:13b".to_string(),
            response: PendingResponse::default(),
            transcribed: String::new(),
            recording_state: RecordingState::Idle,
            has_pending_clip: false,
            waveform_data: Vec::with_capacity(1024),
            debug_info: DebugInfo::new(),
            show_debug_panel: false,
            chat_command_tx: None,
            chat_event_rx: None,
            transcription_command_tx: None,
            transcription_event_rx: None,
            recorder: None,
            last_error: None,
            chat_latency: TimingTracker::new(32),
            frame_times: VecDeque::with_capacity(60),
        }
    }

    /// Update FPS calculation
    pub fn update_fps(&mut self, delta_time: f64) {
        self.frame_times.push_back(delta_time);
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if !self.frame_times.is_empty() {
            let avg_time: f64 =
                self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
            self.debug_info.fps = if avg_time > 0.0 { 1.0 / avg_time as f32 } else { 0.0 };
        }
    }

    /// Send the current input to the backend.
    ///
    /// Empty or whitespace-only input is a no-op: nothing is dispatched
    /// and no state changes.
    pub fn send_message(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() || self.response.is_loading {
            return;
        }

        if let Some(tx) = &self.chat_command_tx {
            let request_id = Uuid::new_v4();
            let _ = tx.send(ChatCommand::Send {
                message: text,
                model: self.model.clone(),
                request_id,
            });

            self.response = PendingResponse {
                text: String::new(),
                is_loading: true,
                request_id: Some(request_id),
                elapsed_ms: None,
            };

            self.input_text.clear();
        }
    }

    /// Ask the backend for the conversation history (used at startup).
    pub fn refresh_history(&mut self) {
        if let Some(tx) = &self.chat_command_tx {
            let _ = tx.send(ChatCommand::FetchHistory);
        }
    }

    /// Start recording audio
    pub fn start_recording(&mut self) {
        if self.recording_state != RecordingState::Idle {
            return;
        }

        self.recording_state = RecordingState::Recording;
        self.transcribed.clear();
        self.waveform_data.clear();
        self.has_pending_clip = false;

        if let Some(recorder) = &self.recorder {
            let _ = recorder.send_command(RecorderCommand::Start);
        }
        self.debug_info.add_log("Recording started".to_string());
    }

    /// Stop recording. A no-op when no recording is active.
    pub fn stop_recording(&mut self) {
        if self.recording_state != RecordingState::Recording {
            return;
        }

        self.recording_state = RecordingState::Idle;
        if let Some(recorder) = &self.recorder {
            let _ = recorder.send_command(RecorderCommand::Stop);
        }
        self.debug_info.add_log("Recording stopped".to_string());
    }

    /// Cancel recording without keeping the clip
    pub fn cancel_recording(&mut self) {
        if self.recording_state != RecordingState::Recording {
            return;
        }

        self.recording_state = RecordingState::Idle;
        self.waveform_data.clear();
        if let Some(recorder) = &self.recorder {
            let _ = recorder.send_command(RecorderCommand::Cancel);
        }
        self.debug_info.add_log("Recording cancelled".to_string());
    }

    /// Submit the pending clip for final transcription
    pub fn send_audio(&mut self) {
        if !self.has_pending_clip || self.recording_state != RecordingState::Idle {
            return;
        }

        self.has_pending_clip = false;
        self.recording_state = RecordingState::Processing;
        self.transcribed = "Transcribing...".to_string();

        if let Some(recorder) = &self.recorder {
            let _ = recorder.send_command(RecorderCommand::SendClip);
        }
        self.debug_info.add_log("Clip submitted for transcription".to_string());
    }

    /// Process incoming events from backend channels
    pub fn poll_events(&mut self) {
        self.poll_chat_events();
        self.poll_transcription_events();
        self.poll_recorder_events();
    }

    fn poll_chat_events(&mut self) {
        let Some(rx) = self.chat_event_rx.clone() else {
            return;
        };

        while let Ok(event) = rx.try_recv() {
            match event {
                ChatEvent::Started { request_id } => {
                    if self.response.request_id == Some(request_id) {
                        self.debug_info.add_log("Chat request sent".to_string());
                    }
                }
                ChatEvent::Complete {
                    response,
                    request_id,
                    elapsed_ms,
                } => {
                    if self.response.request_id == Some(request_id) {
                        self.response.text = response;
                        self.response.is_loading = false;
                        self.response.elapsed_ms = Some(elapsed_ms);

                        self.chat_latency.record(Duration::from_millis(elapsed_ms));
                        self.debug_info.chat_status = format!(
                            "Last: {}ms, avg: {}ms ({} requests)",
                            elapsed_ms,
                            self.chat_latency.average().as_millis(),
                            self.chat_latency.count()
                        );
                    }
                }
                ChatEvent::History { entries } => {
                    self.debug_info.history_status = format!("{} entries", entries.len());
                    self.messages.replace_all(&entries);
                }
                ChatEvent::Error { error, request_id } => {
                    // The error string is the response area content,
                    // e.g. "Error: 500 Internal Server Error"
                    if request_id.is_none() || self.response.request_id == request_id {
                        self.response.text = error.clone();
                        self.response.is_loading = false;
                    }
                    self.last_error = Some(error.clone());
                    self.debug_info.add_log(error);
                }
                ChatEvent::Shutdown => {
                    self.debug_info.add_log("Chat pipeline shutdown".to_string());
                }
            }
        }
    }

    fn poll_transcription_events(&mut self) {
        let Some(rx) = self.transcription_event_rx.clone() else {
            return;
        };

        while let Ok(event) = rx.try_recv() {
            match event {
                TranscriptionEvent::Partial { text } => {
                    self.debug_info.transcription_status =
                        format!("Streaming: {} chars", text.len());
                    self.transcribed = text;
                }
                TranscriptionEvent::Final { text } => {
                    self.debug_info.transcription_status = format!("Final: {} chars", text.len());
                    self.transcribed = text;
                    if self.recording_state == RecordingState::Processing {
                        self.recording_state = RecordingState::Idle;
                    }
                }
                TranscriptionEvent::Error { error, fatal } => {
                    if fatal {
                        // Matches what the response area shows for failed
                        // clip uploads
                        self.transcribed = "Error transcribing audio".to_string();
                        if self.recording_state == RecordingState::Processing {
                            self.recording_state = RecordingState::Idle;
                        }
                    }
                    self.debug_info.add_log(format!("Transcription error: {}", error));
                }
                TranscriptionEvent::Shutdown => {
                    self.debug_info
                        .add_log("Transcription pipeline shutdown".to_string());
                }
            }
        }
    }

    fn poll_recorder_events(&mut self) {
        let Some(recorder) = &self.recorder else {
            return;
        };

        let mut events = Vec::new();
        while let Some(event) = recorder.try_recv_event() {
            events.push(event);
        }

        for event in events {
            match event {
                RecorderEvent::RecordingStarted { session_id } => {
                    self.debug_info.session_status = session_id;
                }
                RecorderEvent::RecordingStopped {
                    duration_secs,
                    has_clip,
                } => {
                    self.has_pending_clip = has_clip;
                    self.debug_info
                        .add_log(format!("Captured {:.1}s of audio", duration_secs));
                }
                RecorderEvent::RecordingCancelled => {
                    self.debug_info.session_status.clear();
                }
                RecorderEvent::ClipSubmitted => {
                    self.debug_info.session_status.clear();
                }
                RecorderEvent::Shutdown => {
                    self.debug_info.add_log("Recorder shutdown".to_string());
                }
            }
        }
    }

    /// Ask every worker to shut down. Called when the window closes.
    pub fn shutdown(&mut self) {
        if let Some(tx) = &self.chat_command_tx {
            let _ = tx.send(ChatCommand::Shutdown);
        }
        if let Some(tx) = &self.transcription_command_tx {
            let _ = tx.send(TranscriptionCommand::Shutdown);
        }
        if let Some(recorder) = &self.recorder {
            let _ = recorder.send_command(RecorderCommand::Shutdown);
        }
    }

    /// Replace the waveform window with a downsampled copy of the shared
    /// visualization buffer.
    pub fn update_waveform(&mut self, samples: &[f32]) {
        const MAX_SAMPLES: usize = 1024;

        if samples.len() > MAX_SAMPLES {
            let step = samples.len() / MAX_SAMPLES;
            self.waveform_data = samples
                .iter()
                .step_by(step)
                .take(MAX_SAMPLES)
                .copied()
                .collect();
        } else {
            self.waveform_data = samples.to_vec();
        }
    }
}
