//! Recording session loop
//!
//! Sits between the capture stream and the transcription pipeline. While a
//! recording is active it drains captured frames, keeps the waveform
//! window fresh for the UI, accumulates the full clip, and cuts a chunk
//! for streaming upload every time one interval's worth of audio is
//! staged — the same one-second cadence the backend's streaming endpoint
//! expects. The finished clip stays here until the user submits it.

use crate::audio::AudioRingBuffer;
use crate::session::SessionConfig;
use crate::transcription::TranscriptionCommand;
use crate::{CompanionError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How much recent audio the waveform visualization keeps, in seconds.
const WAVEFORM_WINDOW_SECS: usize = 2;

/// Commands that can be sent to the recorder
#[derive(Debug, Clone)]
pub enum RecorderCommand {
    /// Start a new recording session
    Start,

    /// Stop recording and keep the clip for submission
    Stop,

    /// Discard the current recording
    Cancel,

    /// Submit the pending clip for final transcription
    SendClip,

    /// Shutdown the recorder
    Shutdown,
}

/// Events emitted by the recorder
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// A recording session began
    RecordingStarted { session_id: String },

    /// Recording finished; `has_clip` says whether anything was captured
    RecordingStopped { duration_secs: f32, has_clip: bool },

    /// Recording discarded
    RecordingCancelled,

    /// The pending clip left for transcription
    ClipSubmitted,

    /// Recorder has shut down
    Shutdown,
}

/// Handle for controlling the recorder from the UI
pub struct RecorderHandle {
    command_tx: Sender<RecorderCommand>,
    event_rx: Receiver<RecorderEvent>,
    audio_tx: Sender<Vec<f32>>,
    is_recording: Arc<AtomicBool>,
    waveform_buffer: Arc<Mutex<Vec<f32>>>,
}

impl RecorderHandle {
    /// Send a command to the recorder
    pub fn send_command(&self, cmd: RecorderCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| CompanionError::ChannelError(format!("Failed to send command: {}", e)))
    }

    /// Try to receive an event from the recorder
    pub fn try_recv_event(&self) -> Option<RecorderEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Get the sender the capture stream feeds
    pub fn audio_sender(&self) -> Sender<Vec<f32>> {
        self.audio_tx.clone()
    }

    /// Check if recording is active
    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    /// Get the waveform buffer for visualization
    pub fn waveform_buffer(&self) -> Arc<Mutex<Vec<f32>>> {
        Arc::clone(&self.waveform_buffer)
    }
}

/// The recording session loop
pub struct Recorder {
    config: SessionConfig,
    capture_rate: u32,
    command_rx: Receiver<RecorderCommand>,
    event_tx: Sender<RecorderEvent>,
    audio_rx: Receiver<Vec<f32>>,
    transcription_tx: Sender<TranscriptionCommand>,
    is_recording: Arc<AtomicBool>,
    waveform_buffer: Arc<Mutex<Vec<f32>>>,
}

impl Recorder {
    /// Create a recorder and its UI handle.
    ///
    /// `capture_rate` is the native rate of the input device; chunk sizes
    /// are derived from it so one chunk always covers one interval of
    /// wall-clock audio.
    pub fn new(
        config: SessionConfig,
        capture_rate: u32,
        transcription_tx: Sender<TranscriptionCommand>,
    ) -> (Self, RecorderHandle) {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);
        let (audio_tx, audio_rx) = bounded(1000);

        let is_recording = Arc::new(AtomicBool::new(false));
        let waveform_buffer = Arc::new(Mutex::new(Vec::with_capacity(
            capture_rate as usize * WAVEFORM_WINDOW_SECS,
        )));

        let handle = RecorderHandle {
            command_tx,
            event_rx,
            audio_tx,
            is_recording: Arc::clone(&is_recording),
            waveform_buffer: Arc::clone(&waveform_buffer),
        };

        let recorder = Self {
            config,
            capture_rate,
            command_rx,
            event_tx,
            audio_rx,
            transcription_tx,
            is_recording,
            waveform_buffer,
        };

        (recorder, handle)
    }

    /// Start the recorder loop on its own thread.
    pub fn start(self) -> Result<JoinHandle<()>> {
        let chunk_samples =
            (self.capture_rate as f64 * self.config.chunk_interval.as_secs_f64()) as usize;
        if chunk_samples == 0 {
            return Err(CompanionError::ConfigError(
                "Chunk interval too short for capture rate".to_string(),
            ));
        }

        let capture_rate = self.capture_rate;
        let command_rx = self.command_rx;
        let event_tx = self.event_tx;
        let audio_rx = self.audio_rx;
        let transcription_tx = self.transcription_tx;
        let is_recording = self.is_recording;
        let waveform_buffer = self.waveform_buffer;

        let handle = thread::Builder::new()
            .name("recorder".to_string())
            .spawn(move || {
                info!(
                    "Recorder started ({} Hz, {} samples/chunk)",
                    capture_rate, chunk_samples
                );

                let mut state = SessionState::new(chunk_samples);
                let waveform_window = capture_rate as usize * WAVEFORM_WINDOW_SECS;

                loop {
                    match command_rx.try_recv() {
                        Ok(RecorderCommand::Start) => {
                            let session_id = Uuid::new_v4().to_string();
                            debug!("Recording started (session {})", session_id);
                            state.begin(session_id.clone());
                            waveform_buffer.lock().clear();
                            is_recording.store(true, Ordering::SeqCst);
                            let _ = event_tx.send(RecorderEvent::RecordingStarted { session_id });
                        }
                        Ok(RecorderCommand::Stop) => {
                            if !is_recording.load(Ordering::SeqCst) {
                                debug!("Stop requested while not recording");
                                continue;
                            }
                            is_recording.store(false, Ordering::SeqCst);

                            // Pull in whatever the capture thread already sent
                            drain_audio(
                                &audio_rx,
                                true,
                                &mut state,
                                &waveform_buffer,
                                waveform_window,
                            );

                            state.cut_chunks(capture_rate, &transcription_tx);

                            // The tail shorter than one chunk still belongs
                            // to the stream session
                            let tail = state.take_staged_tail();
                            if !tail.is_empty() {
                                state.send_chunk(tail, capture_rate, &transcription_tx);
                            }

                            let (duration_secs, has_clip) = state.finish(capture_rate);
                            debug!(
                                "Recording stopped ({:.2}s, clip: {})",
                                duration_secs, has_clip
                            );
                            let _ = event_tx.send(RecorderEvent::RecordingStopped {
                                duration_secs,
                                has_clip,
                            });
                        }
                        Ok(RecorderCommand::Cancel) => {
                            is_recording.store(false, Ordering::SeqCst);
                            state.discard();
                            waveform_buffer.lock().clear();
                            debug!("Recording cancelled");
                            let _ = event_tx.send(RecorderEvent::RecordingCancelled);
                        }
                        Ok(RecorderCommand::SendClip) => {
                            match state.take_pending_clip() {
                                Some(samples) => {
                                    let _ = transcription_tx.send(
                                        TranscriptionCommand::FinalizeClip {
                                            samples,
                                            sample_rate: capture_rate,
                                        },
                                    );
                                    let _ = event_tx.send(RecorderEvent::ClipSubmitted);
                                }
                                None => warn!("SendClip requested with no pending clip"),
                            }
                        }
                        Ok(RecorderCommand::Shutdown) => {
                            info!("Recorder shutting down");
                            let _ = event_tx.send(RecorderEvent::Shutdown);
                            break;
                        }
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => {
                            warn!("Command channel disconnected");
                            break;
                        }
                    }

                    let recording = is_recording.load(Ordering::SeqCst);
                    drain_audio(
                        &audio_rx,
                        recording,
                        &mut state,
                        &waveform_buffer,
                        waveform_window,
                    );

                    if recording {
                        state.cut_chunks(capture_rate, &transcription_tx);
                    }

                    thread::sleep(std::time::Duration::from_millis(10));
                }

                info!("Recorder stopped");
            })
            .map_err(|e| CompanionError::ChannelError(format!("Failed to spawn recorder: {}", e)))?;

        Ok(handle)
    }
}

/// Drain captured frames. Frames arriving while idle are discarded so the
/// channel never backs up against the audio callback.
fn drain_audio(
    audio_rx: &Receiver<Vec<f32>>,
    recording: bool,
    state: &mut SessionState,
    waveform_buffer: &Arc<Mutex<Vec<f32>>>,
    waveform_window: usize,
) {
    while let Ok(samples) = audio_rx.try_recv() {
        if !recording {
            continue;
        }

        {
            let mut buffer = waveform_buffer.lock();
            buffer.extend_from_slice(&samples);
            let len = buffer.len();
            if len > waveform_window {
                buffer.drain(0..len - waveform_window);
            }
        }

        state.append(&samples);
    }
}

/// Per-recording bookkeeping: the full clip, the staging area chunks are
/// cut from, and the session id chunks are tagged with.
struct SessionState {
    chunk_samples: usize,
    session_id: Option<String>,
    staged: AudioRingBuffer,
    clip: Vec<f32>,
    pending_clip: Option<Vec<f32>>,
    chunks_sent: usize,
}

impl SessionState {
    fn new(chunk_samples: usize) -> Self {
        Self {
            chunk_samples,
            session_id: None,
            // Generous headroom: chunks are cut every loop tick, so the
            // staging buffer normally holds at most one interval of audio
            staged: AudioRingBuffer::new(chunk_samples * 8),
            clip: Vec::new(),
            pending_clip: None,
            chunks_sent: 0,
        }
    }

    fn begin(&mut self, session_id: String) {
        self.session_id = Some(session_id);
        self.staged.clear();
        self.clip.clear();
        self.pending_clip = None;
        self.chunks_sent = 0;
    }

    fn append(&mut self, samples: &[f32]) {
        self.staged.write(samples);
        self.clip.extend_from_slice(samples);
    }

    /// Cut and send every full chunk currently staged.
    fn cut_chunks(&mut self, sample_rate: u32, transcription_tx: &Sender<TranscriptionCommand>) {
        while self.staged.len() >= self.chunk_samples {
            let chunk = self.staged.read(self.chunk_samples);
            self.send_chunk(chunk, sample_rate, transcription_tx);
        }
    }

    fn send_chunk(
        &mut self,
        chunk: Vec<f32>,
        sample_rate: u32,
        transcription_tx: &Sender<TranscriptionCommand>,
    ) {
        let Some(session_id) = self.session_id.clone() else {
            return;
        };
        self.chunks_sent += 1;
        debug!(
            "Streaming chunk {} ({} samples)",
            self.chunks_sent,
            chunk.len()
        );
        let _ = transcription_tx.send(TranscriptionCommand::StreamChunk {
            session_id,
            samples: chunk,
            sample_rate,
        });
    }

    fn take_staged_tail(&mut self) -> Vec<f32> {
        self.staged.drain()
    }

    /// Close the session, keeping the clip for submission.
    /// Returns its duration and whether anything was captured.
    fn finish(&mut self, sample_rate: u32) -> (f32, bool) {
        let has_clip = !self.clip.is_empty();
        let duration_secs = self.clip.len() as f32 / sample_rate as f32;
        self.pending_clip = has_clip.then(|| std::mem::take(&mut self.clip));
        self.session_id = None;
        (duration_secs, has_clip)
    }

    fn take_pending_clip(&mut self) -> Option<Vec<f32>> {
        self.pending_clip.take()
    }

    fn discard(&mut self) {
        self.session_id = None;
        self.staged.clear();
        self.clip.clear();
        self.pending_clip = None;
        self.chunks_sent = 0;
    }
}
