//! Companion - desktop voice-and-text chat client
//!
//! Wires the pipelines to the UI and hands control to eframe.

use anyhow::Result;
#[cfg(feature = "audio-io")]
use companion::audio::AudioInput;
use companion::audio::UPLOAD_SAMPLE_RATE;
use companion::chat::ChatPipeline;
use companion::session::{Recorder, SessionConfig};
use companion::transcription::TranscriptionPipeline;
use companion::ui::{AppState, CompanionApp};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "companion=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Companion chat client");

    let config = SessionConfig::from_env();
    config.validate()?;
    info!("Using companion server at {}", config.server_url);

    // Chat pipeline
    let chat_pipeline = ChatPipeline::new(config.clone());
    let chat_command_tx = chat_pipeline.command_sender();
    let chat_event_rx = chat_pipeline.event_receiver();
    chat_pipeline.start_worker()?;

    // Transcription pipeline
    let transcription_pipeline = TranscriptionPipeline::new(config.clone());
    let transcription_tx = transcription_pipeline.command_sender();
    let transcription_command_tx = transcription_pipeline.command_sender();
    let transcription_event_rx = transcription_pipeline.event_receiver();
    transcription_pipeline.start_worker()?;

    // Microphone capture. Failure to open a device leaves the app in
    // text-only mode rather than refusing to start.
    #[cfg(feature = "audio-io")]
    let mut audio_input = if config.enable_audio_input {
        match AudioInput::open() {
            Ok(input) => Some(input),
            Err(e) => {
                tracing::warn!("Audio input unavailable, text-only mode: {}", e);
                None
            }
        }
    } else {
        None
    };

    #[cfg(feature = "audio-io")]
    let capture_rate = audio_input
        .as_ref()
        .map(|input| input.sample_rate())
        .unwrap_or(UPLOAD_SAMPLE_RATE);
    #[cfg(not(feature = "audio-io"))]
    let capture_rate = UPLOAD_SAMPLE_RATE;

    // Recorder loop
    let (recorder, recorder_handle) = Recorder::new(config.clone(), capture_rate, transcription_tx);

    #[cfg(feature = "audio-io")]
    {
        let capture_failed = match audio_input.as_mut() {
            Some(input) => match input.start_capture(recorder_handle.audio_sender()) {
                Ok(()) => false,
                Err(e) => {
                    tracing::warn!("Failed to start capture, text-only mode: {}", e);
                    true
                }
            },
            None => false,
        };
        if capture_failed {
            audio_input = None;
        }
    }

    let _recorder_thread = recorder.start()?;

    // Wire up UI state
    let mut state = AppState::new();
    state.model = config.default_model.clone();
    state.chat_command_tx = Some(chat_command_tx);
    state.chat_event_rx = Some(chat_event_rx);
    state.transcription_command_tx = Some(transcription_command_tx);
    state.transcription_event_rx = Some(transcription_event_rx);
    state.recorder = Some(recorder_handle);

    // Load history on startup
    state.refresh_history();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Companion"),
        ..Default::default()
    };

    eframe::run_native(
        "Companion",
        options,
        Box::new(move |cc| {
            #[allow(unused_mut)]
            let mut app = CompanionApp::new(cc, state);
            #[cfg(feature = "audio-io")]
            if let Some(input) = audio_input {
                app.attach_audio_input(input);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    Ok(())
}
