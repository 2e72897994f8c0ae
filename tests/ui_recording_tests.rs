//! UI recording state tests
//!
//! These tests drive the recording state machine against a live recorder
//! loop (no audio device, no network: captured frames are injected through
//! the handle and transcription commands land on a test channel).

use companion::session::{Recorder, SessionConfig};
use companion::transcription::{TranscriptionCommand, TranscriptionEvent};
use companion::ui::{AppState, RecordingState};
use crossbeam_channel::{unbounded, Receiver};
use std::time::Duration;

/// Give the recorder loop time to pick up commands and audio.
const SETTLE: Duration = Duration::from_millis(150);

fn state_with_recorder() -> (AppState, Receiver<TranscriptionCommand>) {
    let (transcription_tx, transcription_rx) = unbounded();
    let (recorder, handle) = Recorder::new(SessionConfig::default(), 16000, transcription_tx);
    let _worker = recorder.start().expect("recorder should start");

    let mut state = AppState::new();
    state.recorder = Some(handle);
    (state, transcription_rx)
}

fn settle(state: &mut AppState) {
    std::thread::sleep(SETTLE);
    state.poll_events();
}

#[test]
fn test_initial_state_is_idle() {
    let state = AppState::new();
    assert_eq!(
        state.recording_state,
        RecordingState::Idle,
        "Initial state should be Idle"
    );
    assert!(!state.has_pending_clip);
}

#[test]
fn test_start_recording_opens_a_session() {
    let (mut state, _transcription_rx) = state_with_recorder();

    state.start_recording();
    assert_eq!(state.recording_state, RecordingState::Recording);

    settle(&mut state);
    assert!(
        !state.debug_info.session_status.is_empty(),
        "A session id should have been minted"
    );
}

#[test]
fn test_stop_without_start_is_noop() {
    let (mut state, transcription_rx) = state_with_recorder();

    state.stop_recording();
    assert_eq!(state.recording_state, RecordingState::Idle);

    settle(&mut state);
    assert!(!state.has_pending_clip);
    assert!(
        transcription_rx.try_recv().is_err(),
        "Nothing should have been uploaded"
    );
}

#[test]
fn test_stop_with_no_audio_leaves_no_clip() {
    let (mut state, _transcription_rx) = state_with_recorder();

    state.start_recording();
    settle(&mut state);

    state.stop_recording();
    settle(&mut state);

    assert_eq!(state.recording_state, RecordingState::Idle);
    assert!(!state.has_pending_clip, "Silence produces no pending clip");
}

#[test]
fn test_recorded_audio_produces_pending_clip_and_chunks() {
    let (mut state, transcription_rx) = state_with_recorder();

    state.start_recording();
    settle(&mut state);

    // Inject two seconds of captured audio through the capture channel
    let audio_tx = state.recorder.as_ref().unwrap().audio_sender();
    for _ in 0..4 {
        audio_tx.send(vec![0.05; 8000]).unwrap();
    }
    settle(&mut state);

    state.stop_recording();
    settle(&mut state);

    assert!(state.has_pending_clip, "Captured audio should leave a clip");

    // The two seconds were streamed as interval chunks during recording
    let mut chunk_count = 0;
    let mut streamed_samples = 0;
    while let Ok(cmd) = transcription_rx.try_recv() {
        match cmd {
            TranscriptionCommand::StreamChunk { samples, .. } => {
                chunk_count += 1;
                streamed_samples += samples.len();
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }
    assert!(chunk_count >= 2, "Expected chunks, got {}", chunk_count);
    assert_eq!(streamed_samples, 32000, "All audio belongs to the stream");
}

#[test]
fn test_send_audio_submits_the_clip() {
    let (mut state, transcription_rx) = state_with_recorder();

    state.start_recording();
    settle(&mut state);

    let audio_tx = state.recorder.as_ref().unwrap().audio_sender();
    audio_tx.send(vec![0.05; 4000]).unwrap();
    settle(&mut state);

    state.stop_recording();
    settle(&mut state);
    assert!(state.has_pending_clip);

    // Drop the streaming chunks that were cut during recording
    while let Ok(cmd) = transcription_rx.try_recv() {
        assert!(matches!(cmd, TranscriptionCommand::StreamChunk { .. }));
    }

    state.send_audio();
    assert_eq!(state.recording_state, RecordingState::Processing);
    assert_eq!(state.transcribed, "Transcribing...");

    std::thread::sleep(SETTLE);
    match transcription_rx.try_recv().unwrap() {
        TranscriptionCommand::FinalizeClip {
            samples,
            sample_rate,
        } => {
            assert_eq!(samples.len(), 4000);
            assert_eq!(sample_rate, 16000);
        }
        other => panic!("Unexpected command: {:?}", other),
    }
}

#[test]
fn test_cancel_discards_the_recording() {
    let (mut state, transcription_rx) = state_with_recorder();

    state.start_recording();
    settle(&mut state);

    let audio_tx = state.recorder.as_ref().unwrap().audio_sender();
    audio_tx.send(vec![0.05; 2000]).unwrap();

    state.cancel_recording();
    settle(&mut state);

    assert_eq!(state.recording_state, RecordingState::Idle);
    assert!(!state.has_pending_clip);

    state.send_audio();
    std::thread::sleep(SETTLE);
    // No FinalizeClip: the cancelled clip is gone
    while let Ok(cmd) = transcription_rx.try_recv() {
        assert!(
            matches!(cmd, TranscriptionCommand::StreamChunk { .. }),
            "Cancelled clip must not be finalized"
        );
    }
}

#[test]
fn test_start_clears_previous_transcription() {
    let (mut state, _transcription_rx) = state_with_recorder();

    state.transcribed = "old text".to_string();
    state.has_pending_clip = true;

    state.start_recording();

    assert!(state.transcribed.is_empty());
    assert!(!state.has_pending_clip);
}

#[test]
fn test_partial_transcription_updates_text_while_recording() {
    let (tx, rx) = unbounded();
    let mut state = AppState::new();
    state.transcription_event_rx = Some(rx);

    state.start_recording();

    tx.send(TranscriptionEvent::Partial {
        text: "hello wor".to_string(),
    })
    .unwrap();
    state.poll_events();

    assert_eq!(state.transcribed, "hello wor");
    assert_eq!(state.recording_state, RecordingState::Recording);
}

#[test]
fn test_final_transcription_completes_processing() {
    let (tx, rx) = unbounded();
    let mut state = AppState::new();
    state.transcription_event_rx = Some(rx);
    state.has_pending_clip = true;

    state.send_audio();
    assert_eq!(state.recording_state, RecordingState::Processing);

    tx.send(TranscriptionEvent::Final {
        text: "hello world".to_string(),
    })
    .unwrap();
    state.poll_events();

    assert_eq!(state.transcribed, "hello world");
    assert_eq!(state.recording_state, RecordingState::Idle);
}
